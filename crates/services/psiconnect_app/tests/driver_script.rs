
use fixtures::state;
use psiconnect_app::{execute, Command, Screen};
use std::str::FromStr;

#[tokio::test(start_paused = true)]
async fn scripted_session_reaches_success() {
    let mut state = state();
    let script = [
        "login paciente@email.com senha",
        "toggle 2024-02-15 14:00",
        "toggle 2024-02-19 09:00",
        "cart",
        "schedule",
        "confirm",
        "accept",
        "pay card 4111111111111111 1227 123 maria silva",
    ];
    let mut last = String::new();
    for line in script {
        let command = Command::from_str(line).unwrap();
        let reply = execute(&mut state, command).await.unwrap();
        assert!(!reply.quit);
        last = reply.text;
    }
    assert_eq!(state.screen(), Screen::Success);
    assert!(last.contains("Pagamento Realizado!"));
    assert!(last.contains("Cartão de Crédito"));
}

#[tokio::test(start_paused = true)]
async fn policy_text_is_shown_on_confirm() {
    let mut state = state();
    for line in ["login a@b.com x", "toggle 2024-02-15 14:00", "schedule"] {
        execute(&mut state, Command::from_str(line).unwrap()).await.unwrap();
    }
    let reply = execute(&mut state, Command::Confirm).await.unwrap();
    assert!(reply.text.contains("Política de Cancelamento"));
    let reply = execute(&mut state, Command::Reject).await.unwrap();
    assert!(reply.text.contains("Confirmar Agendamentos"));
}

#[tokio::test(start_paused = true)]
async fn sessions_command_opens_history() {
    let mut state = state();
    execute(&mut state, Command::from_str("login a@b.com x").unwrap())
        .await
        .unwrap();
    let reply = execute(&mut state, Command::from_str("sessions cancelled").unwrap())
        .await
        .unwrap();
    assert_eq!(state.screen(), Screen::Sessions);
    assert!(reply.text.contains("PED-2024-004"));
    assert!(!reply.text.contains("PED-2024-001"));
}

#[tokio::test]
async fn quit_stops_the_driver() {
    let mut state = state();
    let reply = execute(&mut state, Command::Quit).await.unwrap();
    assert!(reply.quit);
}
