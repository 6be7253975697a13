// --- File: crates/psiconnect_sessions/src/lib.rs ---
pub mod models;
pub mod store;
pub mod validation;

pub use models::{DocumentType, Session, SessionFilter, SessionStats, SessionStatus, SessionType};
pub use store::{seed_sessions, IssuanceReport, SessionStore, SessionStoreError};
