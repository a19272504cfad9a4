//! Looks up the signed-in account.

use std::sync::Arc;

use tamis_domain::{User, messages};

use crate::ApplicationResult;
use crate::ports::{AuthApi, SessionStore};
use crate::session::Session;

/// Result of a profile lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// No token is stored; nothing was sent.
    NotSignedIn,
    /// The account behind the stored token.
    Found {
        /// The account.
        user: User,
    },
    /// The service refused the token or returned no account.
    Rejected {
        /// `message`, else `error`, else the generic profile failure.
        message: String,
    },
}

/// Use case behind `whoami`.
pub struct FetchProfile<A, S> {
    api: Arc<A>,
    session: Session<S>,
}

impl<A: AuthApi, S: SessionStore> FetchProfile<A, S> {
    /// Creates a new `FetchProfile` use case.
    #[must_use]
    pub const fn new(api: Arc<A>, session: Session<S>) -> Self {
        Self { api, session }
    }

    /// Fetches the current user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or the server cannot
    /// be reached or answers garbage.
    pub async fn execute(&self) -> ApplicationResult<ProfileOutcome> {
        let Some(token) = self.session.token().await? else {
            return Ok(ProfileOutcome::NotSignedIn);
        };

        let response = self.api.current_user(&token).await?;
        if response.is_success()
            && let Some(user) = response.data.clone()
        {
            return Ok(ProfileOutcome::Found { user });
        }

        Ok(ProfileOutcome::Rejected {
            message: response.message_or(messages::PROFILE_FALLBACK),
        })
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
            BearerToken::new("jwt").unwrap(),
        )))
    }

    #[tokio::test]
    async fn returns_the_user() {
        let api = Arc::new(FakeAuthApi::new().respond(
            Endpoint::CurrentUser,
            json!({
                "success": true,
                "data": {
                    "id": 1,
                    "email": "a@b.c",
                    "username": "ab",
                    "created_at": "2024-01-01T00:00:00Z"
                }
            }),
        ));

        let outcome = FetchProfile::new(api, signed_in()).execute().await.unwrap();

        let ProfileOutcome::Found { user } = outcome else {
            panic!("expected a user, got {outcome:?}");
        };
        assert_eq!(user.username, "ab");
        assert!(user.created_at.is_some());
    }

    #[tokio::test]
    async fn unauthorized_is_reported() {
        let api = Arc::new(FakeAuthApi::new().respond(
            Endpoint::CurrentUser,
            json!({ "success": false, "error": "Unauthorized" }),
        ));

        let outcome = FetchProfile::new(api, signed_in()).execute().await.unwrap();

        assert_eq!(
            outcome,
            ProfileOutcome::Rejected {
                message: "Unauthorized".to_string()
            }
        );
    }
}
