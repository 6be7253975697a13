// --- File: crates/psiconnect_sessions/src/models.rs ---

use chrono::NaiveDate;
use psiconnect_common::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::store::SessionStoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Label shown on the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Confirmed => "Confirmada",
            SessionStatus::Completed => "Concluída",
            SessionStatus::Cancelled => "Cancelada",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Online,
    Presencial,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionType::Online => f.write_str("online"),
            SessionType::Presencial => f.write_str("presencial"),
        }
    }
}

/// Documents a patient can request for completed sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Invoice,
    #[serde(rename = "frequency")]
    FrequencyReport,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "Nota fiscal",
            DocumentType::FrequencyReport => "Relatório de Frequência",
        }
    }
}

impl FromStr for DocumentType {
    type Err = SessionStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "invoice" | "nota" => Ok(DocumentType::Invoice),
            "frequency" | "frequencia" | "frequência" => Ok(DocumentType::FrequencyReport),
            other => Err(SessionStoreError::Validation(format!(
                "unknown document type '{other}'"
            ))),
        }
    }
}

/// Read-side projection over the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFilter {
    #[default]
    All,
    /// Confirmed sessions that have not happened yet.
    Upcoming,
    Completed,
    Cancelled,
}

impl SessionFilter {
    pub fn matches(&self, status: SessionStatus) -> bool {
        match self {
            SessionFilter::All => true,
            SessionFilter::Upcoming => status == SessionStatus::Confirmed,
            SessionFilter::Completed => status == SessionStatus::Completed,
            SessionFilter::Cancelled => status == SessionStatus::Cancelled,
        }
    }
}

impl FromStr for SessionFilter {
    type Err = SessionStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(SessionFilter::All),
            "upcoming" => Ok(SessionFilter::Upcoming),
            "completed" => Ok(SessionFilter::Completed),
            "cancelled" | "canceled" => Ok(SessionFilter::Cancelled),
            other => Err(SessionStoreError::Validation(format!(
                "unknown filter '{other}'"
            ))),
        }
    }
}

/// One appointment in the patient's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: u32,
    pub order_number: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: SessionStatus,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub price: i64,
    pub psychologist: String,
    pub specialty: String,
    pub invoice_issued: bool,
    pub frequency_report_issued: bool,
}

impl Session {
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.time.as_str())
    }

    pub fn document_issued(&self, document: DocumentType) -> bool {
        match document {
            DocumentType::Invoice => self.invoice_issued,
            DocumentType::FrequencyReport => self.frequency_report_issued,
        }
    }

    /// Completed and not yet issued for `document`.
    pub fn is_eligible_for(&self, document: DocumentType) -> bool {
        self.status == SessionStatus::Completed && !self.document_issued(document)
    }

    pub(crate) fn mark_issued(&mut self, document: DocumentType) {
        match document {
            DocumentType::Invoice => self.invoice_issued = true,
            DocumentType::FrequencyReport => self.frequency_report_issued = true,
        }
    }
}

/// Counters shown above the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
}
