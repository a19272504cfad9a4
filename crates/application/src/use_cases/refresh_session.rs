//! Explicit token refresh.

use std::sync::Arc;

use tamis_domain::{BearerToken, messages};

use crate::ApplicationResult;
use crate::ports::{AuthApi, SessionStore};
use crate::session::Session;

/// Result of a refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No token is stored; nothing was sent.
    NotSignedIn,
    /// A new token replaced the stored one.
    Refreshed {
        /// Remote message, possibly empty.
        message: String,
    },
    /// The service refused, or answered without a usable token.
    Rejected {
        /// `message`, else `error`, else the generic refresh failure.
        message: String,
    },
}

impl RefreshOutcome {
    /// Status line for the outcome.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotSignedIn => messages::LOGIN_REQUIRED,
            Self::Refreshed { message } | Self::Rejected { message } => message,
        }
    }
}

/// Swaps the stored token for a fresh one. Only ever run on request.
pub struct RefreshSession<A, S> {
    api: Arc<A>,
    session: Session<S>,
}

impl<A: AuthApi, S: SessionStore> RefreshSession<A, S> {
    /// Creates a new `RefreshSession` use case.
    #[must_use]
    pub const fn new(api: Arc<A>, session: Session<S>) -> Self {
        Self { api, session }
    }

    /// Refreshes the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or written, or the
    /// server cannot be reached or answers garbage.
    pub async fn execute(&self) -> ApplicationResult<RefreshOutcome> {
        let Some(token) = self.session.token().await? else {
            return Ok(RefreshOutcome::NotSignedIn);
        };

        let response = self.api.refresh_token(&token).await?;
        let fresh = response
            .data()
            .and_then(|d| d.token.as_deref())
            .and_then(|raw| BearerToken::new(raw).ok());

        match fresh {
            Some(fresh) if response.is_success() => {
                self.session.set_token(&fresh).await?;
                tracing::info!(expires_at = ?fresh.expires_at(), "session refreshed");
                Ok(RefreshOutcome::Refreshed {
                    message: response.message_or(""),
                })
            }
            _ => {
                let message = response.message_or(messages::REFRESH_FALLBACK);
                tracing::warn!(%message, "session refresh rejected");
                Ok(RefreshOutcome::Rejected { message })
            }
        }
    }
}
