//! Application error types

use tamis_domain::{DomainError, messages};
use thiserror::Error;

use crate::ports::{ApiError, SessionError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The remote API could not be reached or answered garbage.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Reading or writing the stored session failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// The operation was cancelled.
    #[error("operation cancelled")]
    Cancelled,
}

impl ApplicationError {
    /// Text suitable for a page status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => capitalize(&e.to_string()),
            Self::Api(e) => e.user_message(),
            Self::Session(e) => messages::storage_failure(&e.to_string()),
            Self::Cancelled => "Opération annulée.".to_string(),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
