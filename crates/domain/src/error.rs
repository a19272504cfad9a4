//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required form field is empty.
    #[error("le champ « {0} » est obligatoire")]
    MissingField(&'static str),

    /// A bearer token was empty or whitespace.
    #[error("empty bearer token")]
    EmptyToken,

    /// An authorization code was empty.
    #[error("empty authorization code")]
    EmptyCode,

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The callback query string could not be parsed.
    #[error("invalid callback query: {0}")]
    InvalidCallbackQuery(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
