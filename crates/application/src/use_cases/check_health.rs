//! Service health check.

use std::sync::Arc;

use tamis_domain::HealthData;

use crate::ApplicationResult;
use crate::ports::AuthApi;

/// What the health endpoint reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthOutcome {
    /// Whether the service reported success.
    pub healthy: bool,
    /// Status, environment and version, when sent.
    pub data: HealthData,
    /// `message`, else `error`, else empty.
    pub message: String,
}

impl HealthOutcome {
    /// One-line summary, e.g. `healthy (development, 1.0.0)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let status = self.data.status.as_deref().unwrap_or("unknown");
        let details: Vec<&str> = [&self.data.environment, &self.data.version]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect();
        if details.is_empty() {
            status.to_string()
        } else {
            format!("{status} ({})", details.join(", "))
        }
    }
}

/// Pings the service.
pub struct CheckHealth<A> {
    api: Arc<A>,
}

impl<A: AuthApi> CheckHealth<A> {
    /// Creates a new `CheckHealth` use case.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Calls the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or answers garbage.
    pub async fn execute(&self) -> ApplicationResult<HealthOutcome> {
        let response = self.api.health().await?;
        Ok(HealthOutcome {
            healthy: response.is_success(),
            message: response.message_or(""),
            data: response.data.unwrap_or_default(),
        })
    }
}
