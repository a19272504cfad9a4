//! Finishes linking a Google account from the provider redirect.

use std::sync::Arc;

use tamis_domain::{CallbackQuery, messages};

use crate::ApplicationResult;
use crate::ports::{AuthApi, SessionStore};
use crate::session::Session;

/// Result of processing one provider redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The redirect carried no usable `code`; nothing was sent.
    MissingCode,
    /// No token is stored; nothing was sent.
    NotSignedIn,
    /// The service accepted the code.
    Linked,
    /// The service refused the code.
    Rejected {
        /// `message`, else `error`, else the generic linking failure.
        message: String,
    },
}

impl CallbackOutcome {
    /// Status line for the outcome.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::MissingCode => messages::CALLBACK_MISSING_CODE,
            Self::NotSignedIn => messages::LOGIN_REQUIRED,
            Self::Linked => messages::CALLBACK_LINKED,
            Self::Rejected { message } => message,
        }
    }
}

/// Use case behind the OAuth callback page.
pub struct CompleteGoogleLink<A, S> {
    api: Arc<A>,
    session: Session<S>,
}

impl<A: AuthApi, S: SessionStore> CompleteGoogleLink<A, S> {
    /// Creates a new `CompleteGoogleLink` use case.
    #[must_use]
    pub const fn new(api: Arc<A>, session: Session<S>) -> Self {
        Self { api, session }
    }

    /// Exchanges the code from `query` using the stored token.
    ///
    /// The code is checked before the session, so a bare visit to the
    /// callback never needs a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or the server cannot
    /// be reached or answers garbage.
    pub async fn execute(&self, query: &CallbackQuery) -> ApplicationResult<CallbackOutcome> {
        let Some(code) = query.code() else {
            if let Some(reason) = &query.error {
                tracing::warn!(%reason, "provider redirected back with an error");
            }
            return Ok(CallbackOutcome::MissingCode);
        };

        let Some(token) = self.session.token().await? else {
            tracing::debug!("callback received without a session");
            return Ok(CallbackOutcome::NotSignedIn);
        };

        let response = self.api.complete_google_oauth(&token, &code).await?;
        if response.is_success() {
            tracing::info!("google account linked");
            return Ok(CallbackOutcome::Linked);
        }

        let message = response.message_or(messages::CALLBACK_FALLBACK);
        tracing::warn!(%message, "google link completion rejected");
        Ok(CallbackOutcome::Rejected { message })
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
    async fn missing_code_short_circuits() {
        let api = Arc::new(FakeAuthApi::new());
        let outcome = CompleteGoogleLink::new(Arc::clone(&api), signed_in())
            .execute(&CallbackQuery::default())
            .await
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::MissingCode);
        assert_eq!(outcome.message(), "Code OAuth manquant dans l'URL.");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn provider_error_counts_as_missing_code() {
        let api = Arc::new(FakeAuthApi::new());
        let query = CallbackQuery::parse("?error=access_denied").unwrap();

        let outcome = CompleteGoogleLink::new(Arc::clone(&api), signed_in())
            .execute(&query)
            .await
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::MissingCode);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_token_short_circuits() {
        let api = Arc::new(FakeAuthApi::new());
        let session = Session::new(Arc::new(MemorySessionStore::new()));

        let outcome = CompleteGoogleLink::new(Arc::clone(&api), session)
            .execute(&CallbackQuery::with_code("abc"))
            .await
            .unwrap();

        assert_eq!(outcome.message(), "Veuillez d'abord vous connecter.");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn code_is_sent_with_bearer_token() {
        let api = Arc::new(
            FakeAuthApi::new().respond(Endpoint::CompleteOAuth, json!({ "success": true })),
        );

        let outcome = CompleteGoogleLink::new(Arc::clone(&api), signed_in())
            .execute(&CallbackQuery::with_code("abc"))
            .await
            .unwrap();

        assert_eq!(outcome, CallbackOutcome::Linked);
        assert_eq!(outcome.message(), "Compte Google ajouté avec succès !");
        let call = &api.calls()[0];
        assert_eq!(call.token.as_deref(), Some("jwt-123"));
        assert_eq!(call.body, Some(json!({ "code": "abc" })));
    }

    #[tokio::test]
    async fn rejection_uses_remote_error_then_fallback() {
        let api = Arc::new(
            FakeAuthApi::new()
                .respond(
                    Endpoint::CompleteOAuth,
                    json!({ "success": false, "error": "E" }),
                )
                .respond(Endpoint::CompleteOAuth, json!({ "success": false })),
        );
        let use_case = CompleteGoogleLink::new(api, signed_in());
        let query = CallbackQuery::with_code("abc");

        assert_eq!(use_case.execute(&query).await.unwrap().message(), "E");
        assert_eq!(
            use_case.execute(&query).await.unwrap().message(),
            "Erreur lors de l'ajout du compte Google."
        );
    }
}
