//! Starts linking a Google account to the signed-in user.

use std::sync::Arc;

use tamis_domain::messages;

use crate::ApplicationResult;
use crate::ports::{AuthApi, SessionStore};
use crate::session::Session;

/// What the page should do after asking for a Google authorization URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// No token is stored; nothing was sent.
    NotSignedIn,
    /// Send the user to the provider.
    Redirect {
        /// Exactly the URL the service returned.
        auth_url: String,
    },
    /// The service did not return a URL.
    Rejected {
        /// `message`, else `error`, else the generic OAuth failure.
        message: String,
    },
}

impl LinkOutcome {
    /// Status line for the outcome, if it has one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotSignedIn => Some(messages::LOGIN_REQUIRED_FOR_OAUTH),
            Self::Redirect { .. } => None,
            Self::Rejected { message } => Some(message),
        }
    }
}

/// Use case behind the "link Google" action.
pub struct InitiateGoogleLink<A, S> {
    api: Arc<A>,
    session: Session<S>,
}

impl<A: AuthApi, S: SessionStore> InitiateGoogleLink<A, S> {
    /// Creates a new `InitiateGoogleLink` use case.
    #[must_use]
    pub const fn new(api: Arc<A>, session: Session<S>) -> Self {
        Self { api, session }
    }

    /// Asks the service for the provider authorization URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or the server cannot
    /// be reached or answers garbage.
    pub async fn execute(&self) -> ApplicationResult<LinkOutcome> {
        let Some(token) = self.session.token().await? else {
            tracing::debug!("google link requested without a session");
            return Ok(LinkOutcome::NotSignedIn);
        };

        let response = self.api.initiate_google_oauth(&token).await?;
        if let Some(auth_url) = response.data().and_then(|d| d.redirect_url()) {
            tracing::info!("google authorization URL received");
            return Ok(LinkOutcome::Redirect {
                auth_url: auth_url.to_string(),
            });
        }

        let message = response.message_or(messages::OAUTH_FALLBACK);
        tracing::warn!(%message, "google link initiation rejected");
        Ok(LinkOutcome::Rejected { message })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::MemorySessionStore;
    use crate::testing::{Endpoint, FakeAuthApi};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tamis_domain::BearerToken;

    fn signed_in() -> Session<MemorySessionStore> {
        Session::new(Arc::new(MemorySessionStore::with_token(
            BearerToken::new("jwt-123").unwrap(),
        )))
    }

    #[tokio::test]
    async fn without_token_no_call_is_made() {
        let api = Arc::new(FakeAuthApi::new());
        let session = Session::new(Arc::new(MemorySessionStore::new()));

        let outcome = InitiateGoogleLink::new(Arc::clone(&api), session)
            .execute()
            .await
            .unwrap();

        assert_eq!(outcome, LinkOutcome::NotSignedIn);
        assert_eq!(
            outcome.message(),
            Some("Veuillez d'abord vous connecter pour obtenir un JWT.")
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn auth_url_is_returned_unchanged() {
        let api = Arc::new(FakeAuthApi::new().respond(
            Endpoint::InitiateOAuth,
            json!({ "success": true, "data": { "auth_url": "https://x", "state": "s" } }),
        ));

        let outcome = InitiateGoogleLink::new(Arc::clone(&api), signed_in())
            .execute()
            .await
            .unwrap();

        assert_eq!(
            outcome,
            LinkOutcome::Redirect {
                auth_url: "https://x".to_string()
            }
        );
        assert_eq!(api.calls()[0].token.as_deref(), Some("jwt-123"));
    }

    #[tokio::test]
    async fn missing_url_falls_back_to_generic_message() {
        let api = Arc::new(FakeAuthApi::new().respond(Endpoint::InitiateOAuth, json!({})));

        let outcome = InitiateGoogleLink::new(api, signed_in())
            .execute()
            .await
            .unwrap();

        assert_eq!(outcome.message(), Some("Erreur OAuth"));
    }

    #[tokio::test]
    async fn remote_error_wins_over_fallback() {
        let api = Arc::new(FakeAuthApi::new().respond(
            Endpoint::InitiateOAuth,
            json!({ "success": false, "error": "Invalid token" }),
        ));

        let outcome = InitiateGoogleLink::new(api, signed_in())
            .execute()
            .await
            .unwrap();

        assert_eq!(
            outcome,
            LinkOutcome::Rejected {
                message: "Invalid token".to_string()
            }
        );
    }
}
