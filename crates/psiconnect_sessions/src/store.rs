//! In-memory session history.
//!
//! The store is seeded from static data and lives for the whole program run.
//! Records are edited in place and never removed.

use chrono::{Datelike, NaiveDate};
use psiconnect_common::{PsiError, Slot};
use psiconnect_config::ClinicConfig;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    DocumentType, Session, SessionFilter, SessionStats, SessionStatus, SessionType,
};
use crate::validation::is_valid_email;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("Sessão {0} não encontrada")]
    NotFound(u32),

    /// Rejected form input; the message is shown to the patient as is.
    #[error("{0}")]
    Validation(String),

    #[error("Sessão {id} está {from} e não pode passar para {to}")]
    InvalidStatusTransition {
        id: u32,
        from: SessionStatus,
        to: SessionStatus,
    },
}

impl From<SessionStoreError> for PsiError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(_) => PsiError::NotFoundError(err.to_string()),
            SessionStoreError::Validation(msg) => PsiError::ValidationError(msg),
            SessionStoreError::InvalidStatusTransition { .. } => {
                PsiError::ConflictError(err.to_string())
            }
        }
    }
}

/// Outcome of an accepted document request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuanceReport {
    pub document_type: DocumentType,
    pub email: String,
    /// Sessions whose flag was flipped by this request.
    pub issued_ids: Vec<u32>,
    /// Requested ids that were unknown, not completed, or already issued.
    pub skipped_ids: Vec<u32>,
    /// Sum of the prices of the issued sessions.
    pub total: i64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// Store pre-filled with the demo history.
    pub fn seeded(clinic: &ClinicConfig) -> Self {
        Self::new(seed_sessions(clinic))
    }

    pub fn all(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: u32) -> Result<&Session, SessionStoreError> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or(SessionStoreError::NotFound(id))
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Session, SessionStoreError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SessionStoreError::NotFound(id))
    }

    pub fn filter(&self, filter: SessionFilter) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| filter.matches(s.status))
            .collect()
    }

    pub fn stats(&self) -> SessionStats {
        self.sessions
            .iter()
            .fold(SessionStats::default(), |mut stats, s| {
                match s.status {
                    SessionStatus::Confirmed => stats.upcoming += 1,
                    SessionStatus::Completed => stats.completed += 1,
                    SessionStatus::Cancelled => stats.cancelled += 1,
                }
                stats
            })
    }

    /// Overwrites date and time. No conflict check against other sessions
    /// or against the availability generator; the status is left alone.
    pub fn reschedule(
        &mut self,
        id: u32,
        new_date: NaiveDate,
        new_time: &str,
    ) -> Result<&Session, SessionStoreError> {
        let session = self.get_mut(id)?;
        info!(
            "Rescheduling session {} from {} {} to {} {}",
            id, session.date, session.time, new_date, new_time
        );
        session.date = new_date;
        session.time = new_time.to_string();
        Ok(session)
    }

    /// Completed sessions still missing `document`.
    pub fn eligible_for(&self, document: DocumentType) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.is_eligible_for(document))
            .collect()
    }

    /// Marks `document` as issued for every eligible id in `ids`.
    ///
    /// The form is checked first, in this order: at least one session,
    /// both email fields filled, fields equal, address well formed. Emails
    /// are compared as typed. Ids that are unknown, not completed, or
    /// already issued are reported as skipped and left untouched; a request
    /// where every id is skipped is rejected.
    pub fn issue_documents(
        &mut self,
        ids: &[u32],
        document: DocumentType,
        email: &str,
        confirm_email: &str,
    ) -> Result<IssuanceReport, SessionStoreError> {
        if ids.is_empty() {
            warn!("Document request without sessions");
            return Err(SessionStoreError::Validation(
                "Selecione pelo menos uma sessão".to_string(),
            ));
        }
        if email.is_empty() || confirm_email.is_empty() {
            return Err(SessionStoreError::Validation(
                "Preencha os campos de email".to_string(),
            ));
        }
        if email != confirm_email {
            return Err(SessionStoreError::Validation(
                "Os emails não coincidem".to_string(),
            ));
        }
        if !is_valid_email(email) {
            return Err(SessionStoreError::Validation(
                "Digite um email válido".to_string(),
            ));
        }

        let mut issued_ids = Vec::new();
        let mut skipped_ids = Vec::new();
        let mut total = 0;
        for &id in ids {
            if issued_ids.contains(&id) || skipped_ids.contains(&id) {
                continue;
            }
            match self.sessions.iter_mut().find(|s| s.id == id) {
                Some(session) if session.is_eligible_for(document) => {
                    session.mark_issued(document);
                    total += session.price;
                    issued_ids.push(id);
                }
                _ => skipped_ids.push(id),
            }
        }

        if issued_ids.is_empty() {
            warn!("No eligible session among {:?}", skipped_ids);
            return Err(SessionStoreError::Validation(
                "Nenhuma sessão elegível selecionada".to_string(),
            ));
        }

        info!(
            "{} issued for sessions {:?} to {} (skipped {:?})",
            document.label(),
            issued_ids,
            email,
            skipped_ids
        );
        Ok(IssuanceReport {
            document_type: document,
            email: email.to_string(),
            issued_ids,
            skipped_ids,
            total,
        })
    }

    /// Confirmed → Cancelled.
    pub fn cancel(&mut self, id: u32) -> Result<&Session, SessionStoreError> {
        self.transition(id, SessionStatus::Cancelled)
    }

    /// Confirmed → Completed.
    pub fn complete(&mut self, id: u32) -> Result<&Session, SessionStoreError> {
        self.transition(id, SessionStatus::Completed)
    }

    fn transition(&mut self, id: u32, to: SessionStatus) -> Result<&Session, SessionStoreError> {
        let session = self.get_mut(id)?;
        if session.status != SessionStatus::Confirmed {
            return Err(SessionStoreError::InvalidStatusTransition {
                id,
                from: session.status,
                to,
            });
        }
        debug!("Session {} {} -> {}", id, session.status, to);
        session.status = to;
        Ok(session)
    }

    /// Appends confirmed sessions for a paid order and returns their ids.
    pub fn book(
        &mut self,
        slots: &[Slot],
        session_type: SessionType,
        price: i64,
        clinic: &ClinicConfig,
    ) -> Vec<u32> {
        let mut ids = Vec::with_capacity(slots.len());
        for slot in slots {
            let id = self.next_id();
            self.sessions.push(Session {
                id,
                order_number: format!("PED-{}-{:03}", slot.date.year(), id),
                date: slot.date,
                time: slot.time.clone(),
                status: SessionStatus::Confirmed,
                session_type,
                price,
                psychologist: clinic.psychologist.clone(),
                specialty: clinic.specialty.clone(),
                invoice_issued: false,
                frequency_report_issued: false,
            });
            ids.push(id);
        }
        info!("Booked {} sessions: {:?}", ids.len(), ids);
        ids
    }

    fn next_id(&self) -> u32 {
        self.sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }
}

/// The demo history every patient starts with.
pub fn seed_sessions(clinic: &ClinicConfig) -> Vec<Session> {
    let rows: [(u32, &str, &str, SessionStatus, SessionType, bool, bool); 6] = [
        (1, "2024-02-15", "14:00", SessionStatus::Confirmed, SessionType::Online, false, false),
        (2, "2024-02-12", "16:00", SessionStatus::Completed, SessionType::Presencial, false, true),
        (3, "2024-02-18", "10:00", SessionStatus::Confirmed, SessionType::Online, false, false),
        (4, "2024-02-08", "15:00", SessionStatus::Cancelled, SessionType::Online, false, false),
        (5, "2024-02-22", "09:00", SessionStatus::Confirmed, SessionType::Presencial, false, false),
        (6, "2024-02-05", "11:00", SessionStatus::Completed, SessionType::Online, true, false),
    ];

    rows.iter()
        .filter_map(|&(id, date, time, status, session_type, invoice, frequency)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            Some(Session {
                id,
                order_number: format!("PED-2024-{:03}", id),
                date,
                time: time.to_string(),
                status,
                session_type,
                price: 150,
                psychologist: clinic.psychologist.clone(),
                specialty: clinic.specialty.clone(),
                invoice_issued: invoice,
                frequency_report_issued: frequency,
            })
        })
        .collect()
}
