// --- File: crates/services/psiconnect_app/src/driver.rs ---
//! Runs one parsed command against the app state.

use psiconnect_common::format::long_date;
use psiconnect_common::PsiError;
use psiconnect_slots::ToggleOutcome;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::app_state::AppState;
use crate::commands::{Command, HELP};
use crate::screens;

/// Text to print plus whether the driver should stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn show(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub const PROMPT: &str = "> ";

/// Writes `text` and flushes so it is visible before the next read.
pub async fn emit<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}

pub async fn execute(state: &mut AppState, command: Command) -> Result<Reply, PsiError> {
    let reply = match command {
        Command::Login { email, password } => {
            state.login(&email, &password).await?;
            Reply::show(screens::render(state))
        }
        Command::Slots => Reply::show(screens::render(state)),
        Command::Next => {
            state.next_period()?;
            Reply::show(screens::dashboard(state))
        }
        Command::Prev => {
            state.prev_period()?;
            Reply::show(screens::dashboard(state))
        }
        Command::Toggle { date, time } => {
            let note = match state.toggle(date, &time)? {
                ToggleOutcome::Added => "Horário adicionado",
                ToggleOutcome::Removed => "Horário removido",
                ToggleOutcome::Rejected => "Limite de sessões atingido",
            };
            Reply::show(format!("{}\n{}", note, screens::cart_summary(state)))
        }
        Command::Remove { date, time } => {
            let note = if state.remove(date, &time)? {
                "Horário removido"
            } else {
                "Horário não estava selecionado"
            };
            Reply::show(format!("{}\n{}", note, screens::cart_summary(state)))
        }
        Command::Cart => Reply::show(screens::cart_summary(state)),
        Command::Schedule => {
            state.schedule()?;
            Reply::show(screens::render(state))
        }
        Command::Confirm => {
            state.request_confirm()?;
            Reply::show(screens::confirmation(state))
        }
        Command::Accept => {
            state.accept_policy()?;
            Reply::show(screens::render(state))
        }
        Command::Reject => {
            state.reject_policy()?;
            Reply::show(screens::render(state))
        }
        Command::Pay { method, card } => {
            state.pay(method, card).await?;
            Reply::show(screens::render(state))
        }
        Command::Receipt => {
            let path = state.save_receipt(None)?;
            Reply::show(format!(
                "{}\n\nComprovante salvo em {}",
                state.receipt()?,
                path.display()
            ))
        }
        Command::Home => {
            state.back_to_home()?;
            Reply::show(screens::render(state))
        }
        Command::Sessions(filter) => {
            if state.screen() != crate::navigation::Screen::Sessions {
                state.my_sessions()?;
            }
            let list = state.sessions(filter)?;
            Reply::show(format!(
                "{}\n\n{}",
                screens::top_bar(state),
                screens::sessions(state, list)
            ))
        }
        Command::Details(id) => {
            let session = state.session_details(id)?;
            Reply::show(screens::session_details(state, session))
        }
        Command::Reschedule { id, date, time } => {
            state.reschedule(id, date, &time)?;
            Reply::show(format!(
                "Sessão reagendada\nNova data: {} às {}",
                long_date(date),
                time
            ))
        }
        Command::Cancel(id) => {
            let line = screens::session_line(state.cancel(id)?);
            Reply::show(format!("Sessão cancelada\n  {}", line))
        }
        Command::Eligible(document) => {
            let list = state.eligible(document)?;
            let mut text = format!("Sessões elegíveis para {}:", document.label());
            if list.is_empty() {
                text.push_str("\n  Nenhuma");
            }
            for session in list {
                text.push_str("\n  ");
                text.push_str(&screens::session_line(session));
            }
            Reply::show(text)
        }
        Command::Issue {
            document,
            email,
            confirm_email,
            ids,
        } => {
            let report = state.issue_documents(&ids, document, &email, &confirm_email)?;
            Reply::show(screens::issuance(&report))
        }
        Command::Back => {
            state.back()?;
            Reply::show(screens::render(state))
        }
        Command::Logout => {
            state.logout()?;
            Reply::show(screens::render(state))
        }
        Command::Help => Reply::show(HELP),
        Command::Quit => {
            info!("Driver stopping");
            Reply {
                text: "Até logo!".to_string(),
                quit: true,
            }
        }
    };
    Ok(reply)
}
