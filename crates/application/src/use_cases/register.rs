//! Registration use case.

use std::sync::Arc;

use tamis_domain::{RegisterForm, User};

use crate::ApplicationResult;
use crate::ports::AuthApi;

/// Output from a registration attempt that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    /// Whether the service reported success.
    pub success: bool,
    /// `message`, else `error`, else empty.
    pub message: String,
    /// The created account, when returned.
    pub user: Option<User>,
}

/// Use case for creating an account.
///
/// Never touches the session: a new account still has to log in.
pub struct Register<A> {
    api: Arc<A>,
}

impl<A: AuthApi> Register<A> {
    /// Creates a new `Register` use case.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Submits the registration form.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is empty or the server cannot be reached
    /// or answers garbage.
    pub async fn execute(&self, form: &RegisterForm) -> ApplicationResult<RegisterOutcome> {
        form.validate()?;

        let response = self.api.register(&form.to_request()).await?;
        let success = response.is_success();
        tracing::info!(success, username = %form.username, "registration completed");

        Ok(RegisterOutcome {
            success,
            message: response.message_or(""),
            user: response.data.and_then(|d| d.user),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{Endpoint, FakeAuthApi};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn success_message_is_reported() {
        let api = Arc::new(FakeAuthApi::new().respond(
            Endpoint::Register,
            json!({
                "success": true,
                "message": "M",
                "data": { "user": { "id": 7, "email": "a@b.c", "username": "ab" } }
            }),
        ));

        let outcome = Register::new(Arc::clone(&api))
            .execute(&RegisterForm::new("a@b.c", "ab", "pw"))
            .await
            .unwrap();

        assert_eq!(outcome.message, "M");
        assert_eq!(outcome.user.unwrap().id, 7);
        assert_eq!(
            api.calls()[0].body,
            Some(json!({ "email": "a@b.c", "username": "ab", "password": "pw" }))
        );
    }

    #[tokio::test]
    async fn remote_error_is_surfaced_verbatim() {
        let api = Arc::new(FakeAuthApi::new().respond(
            Endpoint::Register,
            json!({ "success": false, "error": "User with this email already exists" }),
        ));

        let outcome = Register::new(api)
            .execute(&RegisterForm::new("a@b.c", "ab", "pw"))
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.message, "User with this email already exists");
    }

    #[tokio::test]
    async fn missing_username_is_rejected_locally() {
        let api = Arc::new(FakeAuthApi::new());
        let result = Register::new(Arc::clone(&api))
            .execute(&RegisterForm::new("a@b.c", "  ", "pw"))
            .await;

        assert!(result.is_err());
        assert_eq!(api.call_count(Endpoint::Register), 0);
    }
}
