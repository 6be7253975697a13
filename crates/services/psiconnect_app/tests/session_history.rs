
use fixtures::{date, logged_in};
use psiconnect_app::Screen;
use psiconnect_common::PsiError;
use psiconnect_sessions::{DocumentType, SessionFilter, SessionStatus};

#[tokio::test(start_paused = true)]
async fn history_lists_seeded_sessions() {
    let mut state = logged_in().await;
    assert_eq!(state.my_sessions().unwrap(), Screen::Sessions);
    assert_eq!(state.sessions(SessionFilter::All).unwrap().len(), 6);
    let upcoming: Vec<u32> = state
        .sessions(SessionFilter::Upcoming)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(upcoming, vec![1, 3, 5]);
    assert_eq!(state.session_details(2).unwrap().order_number, "PED-2024-002");
    assert!(matches!(
        state.session_details(99).unwrap_err(),
        PsiError::NotFoundError(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn reschedule_confirmed_session() {
    let mut state = logged_in().await;
    state.my_sessions().unwrap();

    let session = state.reschedule(1, date("2024-03-01"), "09:00").unwrap();
    assert_eq!(session.date, date("2024-03-01"));
    assert_eq!(session.time, "09:00");
    assert_eq!(session.status, SessionStatus::Confirmed);

    // completed sessions stay where they are
    assert!(matches!(
        state.reschedule(2, date("2024-03-01"), "09:00").unwrap_err(),
        PsiError::ConflictError(_)
    ));
    // today or earlier, and times outside the grid, are refused
    assert!(matches!(
        state.reschedule(1, date("2024-02-14"), "09:00").unwrap_err(),
        PsiError::ValidationError(_)
    ));
    assert!(matches!(
        state.reschedule(1, date("2024-03-01"), "12:00").unwrap_err(),
        PsiError::ValidationError(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn document_issuance() {
    let mut state = logged_in().await;
    state.my_sessions().unwrap();

    let eligible: Vec<u32> = state
        .eligible(DocumentType::Invoice)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(eligible, vec![2]);

    let err = state
        .issue_documents(&[2], DocumentType::Invoice, "a@b.com", "c@d.com")
        .unwrap_err();
    assert_eq!(err.user_message(), "Os emails não coincidem");

    let report = state
        .issue_documents(&[2, 1], DocumentType::Invoice, "a@b.com", "a@b.com")
        .unwrap();
    assert_eq!(report.issued_ids, vec![2]);
    assert_eq!(report.skipped_ids, vec![1]);
    assert!(state.eligible(DocumentType::Invoice).unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_moves_session_to_cancelled() {
    let mut state = logged_in().await;
    state.my_sessions().unwrap();
    assert_eq!(state.cancel(3).unwrap().status, SessionStatus::Cancelled);
    assert_eq!(state.stats().cancelled, 2);
    assert!(matches!(state.cancel(3).unwrap_err(), PsiError::ConflictError(_)));
}

#[tokio::test(start_paused = true)]
async fn history_actions_need_the_sessions_screen() {
    let mut state = logged_in().await;
    assert!(matches!(
        state.cancel(1).unwrap_err(),
        PsiError::InvalidTransition(_)
    ));
    assert!(matches!(
        state.back().unwrap_err(),
        PsiError::InvalidTransition(_)
    ));
}
