//! Test doubles for the ports.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! downstream crates' tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tamis_domain::{
    ApiResponse, AuthorizationCode, BearerToken, HealthData, LoginData, LoginRequest,
    OAuthInitiateData, RefreshData, RegisterData, RegisterRequest, User,
};

use crate::ports::{ApiError, ApiResult, AuthApi, NavigationError, Navigator};

/// The remote endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /api/auth/register`
    Register,
    /// `POST /api/auth/login`
    Login,
    /// `POST /api/auth/refresh`
    Refresh,
    /// `GET /api/oauth/google/initiate`
    InitiateOAuth,
    /// `POST /api/oauth/complete`
    CompleteOAuth,
    /// `GET /api/user/me`
    CurrentUser,
    /// `GET /api/health`
    Health,
}

/// One call observed by [`FakeAuthApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Which endpoint was hit.
    pub endpoint: Endpoint,
    /// Bearer token sent, if any.
    pub token: Option<String>,
    /// JSON body sent, if any.
    pub body: Option<Value>,
}

/// Scripted [`AuthApi`] that records every call.
///
/// Responses are queued per endpoint as raw JSON and decoded the same way
/// a real body would be. An endpoint with nothing queued answers `{}`.
#[derive(Debug, Default)]
pub struct FakeAuthApi {
    responses: Mutex<HashMap<Endpoint, VecDeque<ApiResult<Value>>>>,
    calls: Mutex<Vec<RecordedCall>>,
    latency: Option<Duration>,
}

impl FakeAuthApi {
    /// Creates a fake with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON body for `endpoint`.
    #[must_use]
    pub fn respond(self, endpoint: Endpoint, body: Value) -> Self {
        self.push(endpoint, Ok(body));
        self
    }

    /// Queues a failure for `endpoint`.
    #[must_use]
    pub fn fail(self, endpoint: Endpoint, error: ApiError) -> Self {
        self.push(endpoint, Err(error));
        self
    }

    /// Delays every response by `latency` (use with paused tokio time).
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made to `endpoint`.
    #[must_use]
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    fn push(&self, endpoint: Endpoint, response: ApiResult<Value>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(endpoint)
            .or_default()
            .push_back(response);
    }

    async fn answer<T>(
        &self,
        endpoint: Endpoint,
        token: Option<&BearerToken>,
        body: Option<Value>,
    ) -> ApiResult<ApiResponse<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                endpoint,
                token: token.map(|t| t.as_str().to_string()),
                body,
            });

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(Value::Object(serde_json::Map::new())));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        serde_json::from_value(next?).map_err(|e| ApiError::Decode {
            status: 200,
            message: e.to_string(),
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

impl AuthApi for FakeAuthApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<ApiResponse<RegisterData>> {
        self.answer(Endpoint::Register, None, to_json(request)).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<ApiResponse<LoginData>> {
        self.answer(Endpoint::Login, None, to_json(request)).await
    }

    async fn refresh_token(&self, token: &BearerToken) -> ApiResult<ApiResponse<RefreshData>> {
        let body = serde_json::json!({ "token": token.as_str() });
        self.answer(Endpoint::Refresh, None, Some(body)).await
    }

    async fn initiate_google_oauth(
        &self,
        token: &BearerToken,
    ) -> ApiResult<ApiResponse<OAuthInitiateData>> {
        self.answer(Endpoint::InitiateOAuth, Some(token), None).await
    }

    async fn complete_google_oauth(
        &self,
        token: &BearerToken,
        code: &AuthorizationCode,
    ) -> ApiResult<ApiResponse> {
        let body = serde_json::json!({ "code": code.as_str() });
        self.answer(Endpoint::CompleteOAuth, Some(token), Some(body))
            .await
    }

    async fn current_user(&self, token: &BearerToken) -> ApiResult<ApiResponse<User>> {
        self.answer(Endpoint::CurrentUser, Some(token), None).await
    }

    async fn health(&self) -> ApiResult<ApiResponse<HealthData>> {
        self.answer(Endpoint::Health, None, None).await
    }
}

/// A navigation observed by [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// External redirect.
    Redirect(String),
    /// In-app route change.
    Route(String),
}

/// [`Navigator`] that only records where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Navigation>>,
    refuse_redirects: bool,
}

impl RecordingNavigator {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose external redirects fail, as when no browser opens.
    #[must_use]
    pub fn refusing_redirects() -> Self {
        Self {
            refuse_redirects: true,
            ..Self::default()
        }
    }

    /// Every navigation so far, in order.
    #[must_use]
    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, navigation: Navigation) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, url: &str) -> Result<(), NavigationError> {
        self.record(Navigation::Redirect(url.to_string()));
        if self.refuse_redirects {
            return Err(NavigationError::OpenFailed {
                url: url.to_string(),
                message: "no browser available".to_string(),
            });
        }
        Ok(())
    }

    fn navigate(&self, route: &str) -> Result<(), NavigationError> {
        self.record(Navigation::Route(route.to_string()));
        Ok(())
    }
}
