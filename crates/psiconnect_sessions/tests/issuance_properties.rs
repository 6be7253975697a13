//! Property tests for document issuance over arbitrary id selections.

use proptest::prelude::*;
use psiconnect_config::ClinicConfig;
use psiconnect_sessions::{DocumentType, SessionStatus, SessionStore};

fn document(invoice: bool) -> DocumentType {
    if invoice {
        DocumentType::Invoice
    } else {
        DocumentType::FrequencyReport
    }
}

proptest! {
    #[test]
    fn only_completed_unflagged_sessions_are_issued(
        ids in proptest::collection::vec(0..10u32, 1..8),
        invoice in any::<bool>(),
    ) {
        let mut store = SessionStore::seeded(&ClinicConfig::default());
        let doc = document(invoice);
        let before = store.all().to_vec();

        let eligible: Vec<u32> = before
            .iter()
            .filter(|s| s.is_eligible_for(doc))
            .map(|s| s.id)
            .collect();
        let result = store.issue_documents(&ids, doc, "paciente@clinica.com", "paciente@clinica.com");
        if !ids.iter().any(|id| eligible.contains(id)) {
            prop_assert!(result.is_err());
            prop_assert_eq!(store.all(), before.as_slice());
            return Ok(());
        }
        let report = result.unwrap();

        for id in &report.issued_ids {
            let original = before.iter().find(|s| s.id == *id).unwrap();
            prop_assert_eq!(original.status, SessionStatus::Completed);
            prop_assert!(!original.document_issued(doc));
            prop_assert!(store.get(*id).unwrap().document_issued(doc));
        }
        for session in store.all() {
            let original = before.iter().find(|s| s.id == session.id).unwrap();
            if !report.issued_ids.contains(&session.id) {
                prop_assert_eq!(session, original);
            }
        }
        prop_assert_eq!(report.total, report.issued_ids.len() as i64 * 150);
    }

    #[test]
    fn rejected_requests_change_nothing(
        ids in proptest::collection::vec(0..10u32, 0..5),
        email in "[a-z ]{0,6}",
    ) {
        let mut store = SessionStore::seeded(&ClinicConfig::default());
        let before = store.all().to_vec();
        // no '@' in the generated address, so the request is always rejected
        let result = store.issue_documents(&ids, DocumentType::Invoice, &email, &email);
        prop_assert!(result.is_err());
        prop_assert_eq!(store.all(), before.as_slice());
    }
}
