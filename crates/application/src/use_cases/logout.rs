//! Logout use case.

use crate::ApplicationResult;
use crate::ports::SessionStore;
use crate::session::Session;

/// Forgets the stored token.
pub struct Logout<S> {
    session: Session<S>,
}

impl<S: SessionStore> Logout<S> {
    /// Creates a new `Logout` use case.
    #[must_use]
    pub const fn new(session: Session<S>) -> Self {
        Self { session }
    }

    /// Clears the session. Returns whether a token was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn execute(&self) -> ApplicationResult<bool> {
        let removed = self.session.clear().await?;
        tracing::info!(removed, "logged out");
        Ok(removed)
    }
}
