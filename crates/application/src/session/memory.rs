//! In-memory session store.

use std::sync::Arc;

use tamis_domain::BearerToken;
use tokio::sync::RwLock;

use crate::ports::{SessionError, SessionStore};

/// Thread-safe in-memory session store.
///
/// Nothing survives the process; used by tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Arc<RwLock<Option<BearerToken>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token`.
    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<BearerToken>, SessionError> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &BearerToken) -> Result<(), SessionError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<bool, SessionError> {
        Ok(self.token.write().await.take().is_some())
    }
}
