//! Session storage port

use std::future::Future;

use tamis_domain::BearerToken;
use thiserror::Error;

/// Errors from a session store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored session could not be decoded.
    #[error("corrupt session data: {0}")]
    Corrupt(String),

    /// No per-user data directory could be determined.
    #[error("could not determine data directory")]
    NoDataDir,
}

/// Port for persisting the single credential token.
///
/// Stores hold at most one token under a fixed key; `save` overwrites.
pub trait SessionStore: Send + Sync {
    /// Reads the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> impl Future<Output = Result<Option<BearerToken>, SessionError>> + Send;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, token: &BearerToken) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Removes the stored token. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn clear(&self) -> impl Future<Output = Result<bool, SessionError>> + Send;
}
