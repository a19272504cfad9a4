//! The session accessor shared by every page.

use std::sync::Arc;

use chrono::Utc;
use tamis_domain::{BearerToken, TokenStatus};

use crate::ports::{Clock, SessionError, SessionStore};

/// Seconds before expiry at which a token is reported as expiring.
const EXPIRING_BUFFER_SECONDS: i64 = 60;

/// Single accessor for the stored credential.
///
/// Cheap to clone; clones share the same store.
pub struct Session<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for Session<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: SessionStore> Session<S> {
    /// Creates a session over `store` using the system clock.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the clock used for status checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn token(&self) -> Result<Option<BearerToken>, SessionError> {
        self.store.load().await
    }

    /// Stores `token`, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn set_token(&self, token: &BearerToken) -> Result<(), SessionError> {
        self.store.save(token).await?;
        tracing::debug!(token = ?token, "session token stored");
        Ok(())
    }

    /// Forgets the stored token. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be modified.
    pub async fn clear(&self) -> Result<bool, SessionError> {
        let removed = self.store.clear().await?;
        tracing::debug!(removed, "session cleared");
        Ok(removed)
    }

    /// Display status of the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn status(&self) -> Result<TokenStatus, SessionError> {
        let token = self.store.load().await?;
        Ok(TokenStatus::evaluate(
            token.as_ref(),
            self.clock.now(),
            EXPIRING_BUFFER_SECONDS,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::MemorySessionStore;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn set_then_get_round_trips_and_overwrites() {
        let session = Session::new(Arc::new(MemorySessionStore::new()));
        assert!(session.token().await.unwrap().is_none());

        session.set_token(&BearerToken::new("A").unwrap()).await.unwrap();
        session.set_token(&BearerToken::new("B").unwrap()).await.unwrap();

        assert_eq!(session.token().await.unwrap().unwrap().as_str(), "B");
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let session = Session::new(Arc::new(MemorySessionStore::new()));
        let other = session.clone();
        session.set_token(&BearerToken::new("T").unwrap()).await.unwrap();

        assert!(other.clear().await.unwrap());
        assert!(session.token().await.unwrap().is_none());
        assert!(!other.clear().await.unwrap());
    }

    #[tokio::test]
    async fn status_uses_the_injected_clock() {
        // payload is base64url of {"exp":1000}
        let store = Arc::new(MemorySessionStore::with_token(
            BearerToken::new("h.eyJleHAiOjEwMDB9.s").unwrap(),
        ));
        let fixed = || DateTime::from_timestamp(2000, 0).unwrap_or_default();
        let session = Session::new(store).with_clock(Arc::new(fixed));

        assert_eq!(session.status().await.unwrap(), TokenStatus::Expired);
    }
}
