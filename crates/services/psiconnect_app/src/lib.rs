// --- File: crates/services/psiconnect_app/src/lib.rs ---
pub mod app_state;
pub mod commands;
pub mod driver;
pub mod navigation;
pub mod screens;

pub use app_state::AppState;
pub use commands::Command;
pub use driver::{emit, execute, Reply, PROMPT};
pub use navigation::{Event, NavigationError, Navigator, Screen};
