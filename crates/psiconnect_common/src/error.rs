use std::fmt;
use thiserror::Error;

/// The base error type for all psiconnect errors.
///
/// Each crate keeps its own error enum and implements `From<CrateError> for PsiError`,
/// so the terminal driver only has to deal with one type.
#[derive(Error, Debug)]
pub enum PsiError {
    /// User input was rejected (empty selection, bad email, incomplete card, ...)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// An event arrived on a screen that does not handle it
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// The requested state change conflicts with the record's current state
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PsiError {
    /// Text for the transient notification shown to the patient.
    pub fn user_message(&self) -> String {
        match self {
            PsiError::ValidationError(msg)
            | PsiError::NotFoundError(msg)
            | PsiError::InvalidTransition(msg)
            | PsiError::ConflictError(msg)
            | PsiError::ParseError(msg) => msg.clone(),
            PsiError::ConfigError(_) | PsiError::InternalError(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }

    /// Whether the error came from rejected user input rather than a fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PsiError::ValidationError(_) | PsiError::ParseError(_) | PsiError::InvalidTransition(_)
        )
    }
}

// Common error conversions
impl From<serde_json::Error> for PsiError {
    fn from(err: serde_json::Error) -> Self {
        PsiError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for PsiError {
    fn from(err: std::io::Error) -> Self {
        PsiError::InternalError(err.to_string())
    }
}

impl From<config::ConfigError> for PsiError {
    fn from(err: config::ConfigError) -> Self {
        PsiError::ConfigError(err.to_string())
    }
}

impl From<chrono::ParseError> for PsiError {
    fn from(err: chrono::ParseError) -> Self {
        PsiError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> PsiError {
    PsiError::ValidationError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> PsiError {
    PsiError::ConflictError(message.to_string())
}
