//! Auth API client implementation using reqwest.
//!
//! This adapter implements the `AuthApi` port. Every call is a single
//! request; bodies are decoded whatever the HTTP status, so the service's
//! own `error` field reaches the caller on 4xx/5xx too.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tamis_application::{ApiError, ApiResult, AuthApi};
use tamis_domain::{
    ApiResponse, AuthorizationCode, BearerToken, ClientSettings, CompleteOAuthRequest, HealthData,
    LoginData, LoginRequest, OAuthInitiateData, RefreshData, RefreshRequest, RegisterData,
    RegisterRequest, User,
};
use url::Url;

/// Maximum number of body characters quoted in a decode error.
const BODY_SNIPPET_CHARS: usize = 120;

/// HTTP client for the remote authentication service.
#[derive(Debug, Clone)]
pub struct ReqwestAuthApi {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl ReqwestAuthApi {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(base_url: Url) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("tamis/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client from the configured base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn from_settings(settings: &ClientSettings) -> ApiResult<Self> {
        let base_url = settings
            .api_base_url()
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        Ok(Self::new(base_url)?.with_timeout(settings.request_timeout()))
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            timeout: None,
        }
    }

    /// Sets a per-request timeout. `None` keeps the transport default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The service base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }

    fn authorized(builder: RequestBuilder, token: &BearerToken) -> RequestBuilder {
        builder.header(AUTHORIZATION, token.authorization_header())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> ApiResult<ApiResponse<T>> {
        let builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let response = builder.send().await.map_err(Self::map_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(Self::map_error)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "auth API answered");

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            status: status.as_u16(),
            message: format!("{e}; body: {}", snippet(&body)),
        })
    }

    /// Maps reqwest errors to `ApiError`.
    fn map_error(error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            return ApiError::Timeout;
        }

        if error.is_connect() {
            let message = error.to_string();
            if message.to_lowercase().contains("refused") {
                return ApiError::ConnectionRefused {
                    host: error
                        .url()
                        .and_then(Url::host_str)
                        .unwrap_or("unknown")
                        .to_string(),
                };
            }
            return ApiError::Transport(message);
        }

        if error.is_builder() {
            return ApiError::InvalidUrl(error.to_string());
        }

        ApiError::Transport(error.to_string())
    }
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.chars().count() > BODY_SNIPPET_CHARS {
        let cut: String = text.chars().take(BODY_SNIPPET_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

impl AuthApi for ReqwestAuthApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<ApiResponse<RegisterData>> {
        let url = self.endpoint("api/auth/register")?;
        tracing::debug!(%url, "register");
        self.send(self.client.post(url).json(request)).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<ApiResponse<LoginData>> {
        let url = self.endpoint("api/auth/login")?;
        tracing::debug!(%url, "login");
        self.send(self.client.post(url).json(request)).await
    }

    async fn refresh_token(&self, token: &BearerToken) -> ApiResult<ApiResponse<RefreshData>> {
        let url = self.endpoint("api/auth/refresh")?;
        let body = RefreshRequest {
            token: token.as_str().to_string(),
        };
        tracing::debug!(%url, "refresh token");
        self.send(self.client.post(url).json(&body)).await
    }

    async fn initiate_google_oauth(
        &self,
        token: &BearerToken,
    ) -> ApiResult<ApiResponse<OAuthInitiateData>> {
        let url = self.endpoint("api/oauth/google/initiate")?;
        tracing::debug!(%url, "initiate google oauth");
        self.send(Self::authorized(self.client.get(url), token))
            .await
    }

    async fn complete_google_oauth(
        &self,
        token: &BearerToken,
        code: &AuthorizationCode,
    ) -> ApiResult<ApiResponse> {
        let url = self.endpoint("api/oauth/complete")?;
        let body = CompleteOAuthRequest {
            code: code.as_str().to_string(),
        };
        tracing::debug!(%url, "complete google oauth");
        self.send(Self::authorized(self.client.post(url), token).json(&body))
            .await
    }

    async fn current_user(&self, token: &BearerToken) -> ApiResult<ApiResponse<User>> {
        let url = self.endpoint("api/user/me")?;
        self.send(Self::authorized(self.client.get(url), token))
            .await
    }

    async fn health(&self) -> ApiResult<ApiResponse<HealthData>> {
        let url = self.endpoint("api/health")?;
        self.send(self.client.get(url)).await
    }
}
