
use fixtures::{at_payment, date, four_slots, logged_in, state};
use psiconnect_app::Screen;
use psiconnect_checkout::{CardDetails, PaymentMethod};
use psiconnect_common::PsiError;
use psiconnect_slots::ToggleOutcome;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn login_waits_and_opens_dashboard() {
    let mut state = state();
    let started = Instant::now();
    assert_eq!(
        state.login("paciente@email.com", "senha").await.unwrap(),
        Screen::Dashboard
    );
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn login_needs_both_fields() {
    let mut state = state();
    let err = state.login("", "senha").await.unwrap_err();
    assert!(matches!(err, PsiError::ValidationError(_)));
    assert_eq!(state.screen(), Screen::Login);
}

#[tokio::test(start_paused = true)]
async fn dashboard_lists_period_zero() {
    let state = logged_in().await;
    let days = state.available_days();
    let dates: Vec<_> = days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date("2024-02-15"), date("2024-02-16"), date("2024-02-19")]);
    let total: usize = days.iter().map(|d| d.slots.len()).sum();
    assert_eq!(total, 16);
}

#[tokio::test(start_paused = true)]
async fn period_navigation_saturates_at_zero() {
    let mut state = logged_in().await;
    assert_eq!(state.prev_period().unwrap(), 0);
    assert_eq!(state.next_period().unwrap(), 1);
    let total: usize = state.available_days().iter().map(|d| d.slots.len()).sum();
    assert_eq!(total, 19);
    assert_eq!(state.prev_period().unwrap(), 0);
}

#[tokio::test(start_paused = true)]
async fn toggle_rules() {
    let mut state = logged_in().await;
    let thursday = date("2024-02-15");

    assert_eq!(state.toggle(thursday, "14:00").unwrap(), ToggleOutcome::Added);
    assert_eq!(state.toggle(thursday, "14:00").unwrap(), ToggleOutcome::Removed);
    assert!(state.cart().is_empty());

    // pre-booked by the availability hash
    let err = state.toggle(thursday, "10:00").unwrap_err();
    assert!(matches!(err, PsiError::ValidationError(_)));

    for (date, time) in four_slots() {
        assert_eq!(state.toggle(date, time).unwrap(), ToggleOutcome::Added);
    }
    assert_eq!(state.cart().total(), 600);
    assert_eq!(
        state.toggle(date("2024-02-16"), "14:00").unwrap(),
        ToggleOutcome::Rejected
    );
    assert_eq!(state.cart().len(), 4);

    assert!(state.remove(thursday, "15:00").unwrap());
    assert!(!state.remove(thursday, "15:00").unwrap());
    assert_eq!(state.cart().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn schedule_requires_a_selection() {
    let mut state = logged_in().await;
    assert!(matches!(
        state.schedule().unwrap_err(),
        PsiError::ValidationError(_)
    ));
    assert_eq!(state.screen(), Screen::Dashboard);
}

#[tokio::test(start_paused = true)]
async fn full_pix_booking() {
    let mut state = at_payment().await;
    assert_eq!(state.screen(), Screen::Payment);
    assert_eq!(state.amount_due(), 600);
    assert!(state.pix_code_preview().ends_with("..."));

    let started = Instant::now();
    let payment = state.pay(PaymentMethod::Pix, None).await.unwrap().clone();
    assert!(started.elapsed() >= Duration::from_millis(3000));
    assert_eq!(payment.amount, 600);
    assert_eq!(payment.sessions.len(), 4);
    assert!(payment.order_id.starts_with("ORD-"));
    assert_eq!(state.screen(), Screen::Success);

    // paid sessions show up as upcoming in the history
    assert_eq!(state.session_store().len(), 10);
    assert_eq!(state.stats().upcoming, 7);

    let receipt = state.receipt().unwrap();
    assert!(receipt.contains("Valor Total: R$ 600,00"));
    assert!(receipt.contains("Forma de Pagamento: PIX"));

    let dir = tempfile::tempdir().unwrap();
    let path = state.save_receipt(Some(dir.path())).unwrap();
    assert!(path.ends_with(format!("comprovante-{}.txt", payment.order_id)));

    assert_eq!(state.back_to_home().unwrap(), Screen::Dashboard);
    assert!(state.cart().is_empty());
    assert!(state.payment().is_none());
    assert!(state.selected_slots().is_empty());
    assert!(state.receipt().is_err());
}

#[tokio::test(start_paused = true)]
async fn incomplete_card_keeps_payment_screen() {
    let mut state = at_payment().await;
    let card = CardDetails::new("4111 1111", "maria", "1227", "123");
    let err = state.pay(PaymentMethod::Card, Some(card)).await.unwrap_err();
    assert!(matches!(err, PsiError::ValidationError(_)));
    assert_eq!(state.screen(), Screen::Payment);
    assert_eq!(state.session_store().len(), 6);

    let card = CardDetails::new("4111111111111111", "maria", "1227", "123");
    let payment = state.pay(PaymentMethod::Card, Some(card)).await.unwrap();
    assert_eq!(payment.method, PaymentMethod::Card);
}

#[tokio::test(start_paused = true)]
async fn back_from_payment_keeps_cart() {
    let mut state = at_payment().await;
    assert_eq!(state.back().unwrap(), Screen::Dashboard);
    assert_eq!(state.cart().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn logout_clears_everything() {
    let mut state = at_payment().await;
    assert_eq!(state.logout().unwrap(), Screen::Login);
    assert!(state.cart().is_empty());
    assert!(state.selected_slots().is_empty());
    assert!(state.payment().is_none());
}

#[tokio::test(start_paused = true)]
async fn actions_outside_their_screen_are_rejected() {
    let mut state = state();
    assert!(matches!(
        state.toggle(date("2024-02-15"), "14:00").unwrap_err(),
        PsiError::InvalidTransition(_)
    ));
    assert!(state.pay(PaymentMethod::Pix, None).await.is_err());
    assert!(state.back().is_err());
    assert_eq!(state.screen(), Screen::Login);
}
