// --- File: crates/services/psiconnect_app/src/navigation.rs ---
//! Screen flow of the booking app.
//!
//! The navigator only decides which screen comes next. Clearing the cart or
//! keeping the payment record is done by [`crate::app_state::AppState`],
//! which reacts to the transition returned here.

use psiconnect_checkout::PaymentData;
use psiconnect_common::{PsiError, Slot};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Dashboard,
    Sessions,
    Confirmation,
    Payment,
    Success,
}

impl Screen {
    /// Top-bar title; the login and dashboard screens have none.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Screen::Sessions => Some("Minhas Sessões"),
            Screen::Confirmation => Some("Confirmar Agendamentos"),
            Screen::Payment => Some("Pagamento"),
            Screen::Success => Some("Confirmação"),
            Screen::Login | Screen::Dashboard => None,
        }
    }

    pub fn subtitle(&self) -> Option<&'static str> {
        match self {
            Screen::Sessions => Some("Histórico e próximas consultas"),
            Screen::Confirmation => Some("Revise suas sessões selecionadas"),
            Screen::Payment => Some("Finalize seu agendamento"),
            Screen::Success => Some("Agendamento realizado com sucesso"),
            Screen::Login | Screen::Dashboard => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Dashboard => "dashboard",
            Screen::Sessions => "sessions",
            Screen::Confirmation => "confirmation",
            Screen::Payment => "payment",
            Screen::Success => "success",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User intents that may move the app to another screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LoggedIn,
    ScheduleAppointment(Vec<Slot>),
    /// Opens the policy modal on the confirmation screen.
    RequestConfirm,
    AcceptPolicy,
    RejectPolicy,
    Back,
    PaymentCompleted(PaymentData),
    BackToHome,
    MySessions,
    Logout,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::LoggedIn => "logged_in",
            Event::ScheduleAppointment(_) => "schedule_appointment",
            Event::RequestConfirm => "request_confirm",
            Event::AcceptPolicy => "accept_policy",
            Event::RejectPolicy => "reject_policy",
            Event::Back => "back",
            Event::PaymentCompleted(_) => "payment_completed",
            Event::BackToHome => "back_to_home",
            Event::MySessions => "my_sessions",
            Event::Logout => "logout",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Ação '{event}' não disponível na tela {from}")]
    InvalidTransition { from: Screen, event: &'static str },

    #[error("Selecione pelo menos um horário")]
    EmptySelection,
}

impl From<NavigationError> for PsiError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::InvalidTransition { .. } => PsiError::InvalidTransition(err.to_string()),
            NavigationError::EmptySelection => PsiError::ValidationError(err.to_string()),
        }
    }
}

/// Current screen plus the policy modal flag of the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    policy_open: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
            policy_open: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_policy_open(&self) -> bool {
        self.policy_open
    }

    /// Applies `event` and returns the new screen.
    ///
    /// A rejected event leaves both the screen and the modal flag untouched.
    pub fn handle(&mut self, event: &Event) -> Result<Screen, NavigationError> {
        let from = self.screen;
        let invalid = || NavigationError::InvalidTransition {
            from,
            event: event.name(),
        };

        let (next, policy_open) = match (from, event) {
            (_, Event::Logout) => (Screen::Login, false),
            (Screen::Login, Event::LoggedIn) => (Screen::Dashboard, false),

            (Screen::Dashboard, Event::ScheduleAppointment(slots)) => {
                if slots.is_empty() {
                    return Err(NavigationError::EmptySelection);
                }
                (Screen::Confirmation, false)
            }
            (Screen::Confirmation, Event::RequestConfirm) if !self.policy_open => {
                (Screen::Confirmation, true)
            }
            (Screen::Confirmation, Event::AcceptPolicy) if self.policy_open => {
                (Screen::Payment, false)
            }
            (Screen::Confirmation, Event::RejectPolicy) if self.policy_open => {
                (Screen::Confirmation, false)
            }
            (Screen::Confirmation, Event::Back) | (Screen::Payment, Event::Back) => {
                (Screen::Dashboard, false)
            }
            (Screen::Payment, Event::PaymentCompleted(_)) => (Screen::Success, false),
            (Screen::Success, Event::BackToHome) => (Screen::Dashboard, false),

            (
                Screen::Dashboard | Screen::Confirmation | Screen::Payment | Screen::Success,
                Event::MySessions,
            ) => (Screen::Sessions, false),
            (Screen::Sessions, Event::Back) => (Screen::Dashboard, false),

            _ => return Err(invalid()),
        };

        if next != from {
            info!("Navigation {} -> {} ({})", from, next, event.name());
        } else {
            debug!("Policy modal open: {}", policy_open);
        }
        self.screen = next;
        self.policy_open = policy_open;
        Ok(next)
    }
}
