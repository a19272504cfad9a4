//! Remote authentication API port

use std::future::Future;

use tamis_domain::{
    ApiResponse, AuthorizationCode, BearerToken, HealthData, LoginData, LoginRequest,
    OAuthInitiateData, RefreshData, RegisterData, RegisterRequest, User, messages,
};
use thiserror::Error;

/// Failures below the application protocol.
///
/// A remote "application error" (falsy `success`, `error` field) is NOT an
/// `ApiError`: it arrives as a decoded [`ApiResponse`]. This type covers the
/// cases where no envelope could be obtained at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The server actively refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// Target host.
        host: String,
    },

    /// The configured request timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// Any other network or I/O failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not the expected JSON envelope.
    #[error("unexpected response body (HTTP {status}): {message}")]
    Decode {
        /// HTTP status code of the response.
        status: u16,
        /// Decoder message and a body snippet.
        message: String,
    },

    /// The caller went away before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Returns true for failures where the server was never reached.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::ConnectionRefused { .. } | Self::Timeout | Self::Transport(_)
        )
    }

    /// Text suitable for a page status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(detail) => messages::transport_failure(detail),
            Self::ConnectionRefused { host } => {
                messages::transport_failure(&format!("connexion refusée par {host}"))
            }
            Self::Timeout => messages::transport_failure("délai dépassé"),
            Self::InvalidUrl(_) => messages::transport_failure(&self.to_string()),
            Self::Decode { status, message } => {
                messages::invalid_response(&format!("HTTP {status}, {message}"))
            }
            Self::Cancelled => "Requête annulée.".to_string(),
        }
    }
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Port for the remote authentication service.
///
/// Every call issues exactly one request and hands back the decoded body
/// whatever the HTTP status. No retries, no caching.
pub trait AuthApi: Send + Sync {
    /// `POST /api/auth/register`.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = ApiResult<ApiResponse<RegisterData>>> + Send;

    /// `POST /api/auth/login`.
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = ApiResult<ApiResponse<LoginData>>> + Send;

    /// `POST /api/auth/refresh` with the token as payload.
    fn refresh_token(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = ApiResult<ApiResponse<RefreshData>>> + Send;

    /// `GET /api/oauth/google/initiate`, authenticated.
    fn initiate_google_oauth(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = ApiResult<ApiResponse<OAuthInitiateData>>> + Send;

    /// `POST /api/oauth/complete`, authenticated.
    fn complete_google_oauth(
        &self,
        token: &BearerToken,
        code: &AuthorizationCode,
    ) -> impl Future<Output = ApiResult<ApiResponse>> + Send;

    /// `GET /api/user/me`, authenticated.
    fn current_user(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = ApiResult<ApiResponse<User>>> + Send;

    /// `GET /api/health`.
    fn health(&self) -> impl Future<Output = ApiResult<ApiResponse<HealthData>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_transport_failures() {
        assert!(ApiError::Timeout.is_transport());
        assert!(
            !ApiError::Decode {
                status: 502,
                message: "expected value".to_string()
            }
            .is_transport()
        );
    }

    #[test]
    fn decode_errors_are_reported_as_invalid_responses() {
        let error = ApiError::Decode {
            status: 502,
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "Réponse invalide du serveur : HTTP 502, expected value at line 1 column 1"
        );
    }
}
