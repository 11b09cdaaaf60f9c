//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No session exists for the identifier.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// A session with the identifier already exists.
    #[error("duplicate session: {0}")]
    DuplicateSession(String),

    /// A turn request failed validation.
    #[error("validation error on `{field}`: {message}")]
    Validation {
        /// The first invalid field.
        field: String,
        /// Human-readable reason.
        message: String,
    },

    /// The oracle transport failed (network, HTTP status, missing completion).
    #[error("oracle error: {0}")]
    Oracle(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a [`DomainError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
