// --- File: crates/psiconnect_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod format; // pt-BR rendering of dates and money
pub mod logging; // Logging utilities
pub mod models; // Shared data structures

// Re-export error types and utilities for easier access
pub use error::{conflict, validation_error, PsiError};

pub use models::Slot;
