//! Request bodies and response payloads for each endpoint.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Body of `POST /api/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Display username.
    pub username: String,
    /// Plain-text password, sent over the wire only.
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /api/auth/refresh`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RefreshRequest {
    /// The token to exchange for a fresh one.
    pub token: String,
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest").field("token", &"***").finish()
    }
}

/// Body of `POST /api/oauth/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompleteOAuthRequest {
    /// Authorization code returned by the provider.
    pub code: String,
}

/// An account as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric account id.
    #[serde(default)]
    pub id: i64,
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Display username.
    #[serde(default)]
    pub username: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `data` of a login response.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginData {
    /// Issued bearer token.
    #[serde(default, deserialize_with = "lenient")]
    pub token: Option<String>,
    /// The authenticated account.
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<User>,
}

impl fmt::Debug for LoginData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginData")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("user", &self.user)
            .finish()
    }
}

/// `data` of a refresh response.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefreshData {
    /// The replacement token.
    #[serde(default, deserialize_with = "lenient")]
    pub token: Option<String>,
}

impl fmt::Debug for RefreshData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshData")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// `data` of a registration response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisterData {
    /// The created account.
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<User>,
}

/// `data` of an OAuth initiation response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OAuthInitiateData {
    /// Provider consent URL the user must visit.
    #[serde(default, deserialize_with = "lenient")]
    pub auth_url: Option<String>,
    /// Opaque state echoed back by the provider.
    #[serde(default, deserialize_with = "lenient")]
    pub state: Option<String>,
}

impl OAuthInitiateData {
    /// The consent URL, ignoring empty strings.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.auth_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// `data` of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthData {
    /// Service status, e.g. `healthy`.
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    /// Deployment environment name.
    #[serde(default, deserialize_with = "lenient")]
    pub environment: Option<String>,
    /// Service version.
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApiResponse;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn login_response_decodes_token_and_user() {
        let body = json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "token": "T",
                "user": {
                    "id": 7,
                    "email": "a@b.c",
                    "username": "alice",
                    "created_at": "2024-05-01T10:00:00Z",
                    "updated_at": "2024-05-01T10:00:00Z"
                }
            }
        });
        let response: ApiResponse<LoginData> = serde_json::from_value(body).unwrap();
        let data = response.data().unwrap();
        assert_eq!(data.token.as_deref(), Some("T"));
        assert_eq!(data.user.as_ref().unwrap().username, "alice");
    }

    #[test]
    fn mistyped_fields_read_as_absent() {
        let body = json!({
            "success": true,
            "message": 42,
            "error": "E",
            "data": { "token": "T", "user": { "id": "u-1" } }
        });
        let response: ApiResponse<LoginData> = serde_json::from_value(body).unwrap();

        assert!(response.is_success());
        assert_eq!(response.message, None);
        assert_eq!(response.display_message(), Some("E"));
        let data = response.data().unwrap();
        assert_eq!(data.token.as_deref(), Some("T"));
        assert_eq!(data.user, None);
    }

    #[test]
    fn mistyped_data_reads_as_absent() {
        let body = json!({ "success": false, "data": "oops" });
        let response: ApiResponse<OAuthInitiateData> = serde_json::from_value(body).unwrap();
        assert_eq!(response.data, None);
    }

    #[test]
    fn initiate_data_ignores_empty_url() {
        let data = OAuthInitiateData {
            auth_url: Some(String::new()),
            state: None,
        };
        assert_eq!(data.redirect_url(), None);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let request = LoginRequest {
            email: "a@b.c".to_string(),
            password: "hunter22".to_string(),
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("hunter22"));

        let data = LoginData {
            token: Some("secret-token".to_string()),
            user: None,
        };
        assert!(!format!("{data:?}").contains("secret-token"));
    }

    #[test]
    fn register_request_serializes_all_fields() {
        let request = RegisterRequest {
            email: "a@b.c".to_string(),
            username: "alice".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "email": "a@b.c", "username": "alice", "password": "pw" })
        );
    }
}
