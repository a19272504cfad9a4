//! Login use case.

use std::sync::Arc;

use tamis_domain::{BearerToken, LoginForm, User};

use crate::ApplicationResult;
use crate::ports::{AuthApi, SessionStore};
use crate::session::Session;

/// Output from a login attempt that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Whether the service reported success.
    pub success: bool,
    /// `message`, else `error`, else empty.
    pub message: String,
    /// Whether a token was written to the session.
    pub token_stored: bool,
    /// The account returned alongside the token.
    pub user: Option<User>,
}

/// Use case for signing in with email and password.
pub struct Login<A, S> {
    api: Arc<A>,
    session: Session<S>,
}

impl<A: AuthApi, S: SessionStore> Login<A, S> {
    /// Creates a new `Login` use case.
    #[must_use]
    pub const fn new(api: Arc<A>, session: Session<S>) -> Self {
        Self { api, session }
    }

    /// Submits the credentials.
    ///
    /// On `success: true` with a `data.token`, the token replaces whatever
    /// the session held. Any other response leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is empty, the server cannot be reached
    /// or answers garbage, or the session cannot be written.
    pub async fn execute(&self, form: &LoginForm) -> ApplicationResult<LoginOutcome> {
        form.validate()?;

        let response = self.api.login(&form.to_request()).await?;
        let message = response.message_or("");
        let success = response.is_success();
        let data = response.data.unwrap_or_default();

        let mut token_stored = false;
        if success && let Some(raw) = data.token {
            match BearerToken::new(raw) {
                Ok(token) => {
                    self.session.set_token(&token).await?;
                    token_stored = true;
                }
                Err(e) => tracing::warn!(error = %e, "login succeeded with an unusable token"),
            }
        }

        tracing::info!(success, token_stored, email = %form.email, "login completed");
        Ok(LoginOutcome {
            success,
            message,
            token_stored,
            user: data.user,
        })
    }
}
