//! Client Settings Domain Model
//!
//! Defines where the client talks to and how the callback listener behaves.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{DomainError, DomainResult};

/// Default base URL of the authentication API.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default bind address of the local callback listener.
pub const DEFAULT_CALLBACK_ADDR: &str = "127.0.0.1:3001";

/// Default path of the OAuth callback page.
pub const DEFAULT_CALLBACK_PATH: &str = "/oauth/callback";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the authentication API.
    pub api_url: String,
    /// Address the callback listener binds to.
    pub callback_addr: String,
    /// Path the provider redirects to.
    pub callback_path: String,
    /// Pause between a successful link and navigating home.
    pub redirect_delay_ms: u64,
    /// How long the callback listener waits for the provider.
    pub callback_timeout_secs: u64,
    /// Per-request timeout; `None` keeps the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            callback_addr: DEFAULT_CALLBACK_ADDR.to_string(),
            callback_path: DEFAULT_CALLBACK_PATH.to_string(),
            redirect_delay_ms: 2000,
            callback_timeout_secs: 300,
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    /// Parses the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if it is not an absolute http(s) URL.
    pub fn api_base_url(&self) -> DomainResult<Url> {
        let url = Url::parse(self.api_url.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Public URL of the local callback page.
    #[must_use]
    pub fn callback_url(&self) -> String {
        format!("http://{}{}", self.callback_addr, self.normalized_callback_path())
    }

    /// Callback path with exactly one leading slash.
    #[must_use]
    pub fn normalized_callback_path(&self) -> String {
        format!("/{}", self.callback_path.trim_start_matches('/'))
    }

    /// Delay before navigating home after a successful link.
    #[must_use]
    pub const fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Time the callback listener stays open.
    #[must_use]
    pub const fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }

    /// Configured request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_local_development() {
        let settings = ClientSettings::default();
        assert_eq!(settings.api_url, "http://localhost:8080");
        assert_eq!(settings.redirect_delay(), Duration::from_millis(2000));
        assert_eq!(settings.request_timeout(), None);
        assert_eq!(
            settings.callback_url(),
            "http://127.0.0.1:3001/oauth/callback"
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{ "api_url": "https://auth.example.com" }"#).unwrap();
        assert_eq!(settings.api_url, "https://auth.example.com");
        assert_eq!(settings.callback_timeout_secs, 300);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let settings = ClientSettings {
            api_url: "ftp://example.com".to_string(),
            ..ClientSettings::default()
        };
        assert!(settings.api_base_url().is_err());

        let settings = ClientSettings {
            api_url: "not a url".to_string(),
            ..ClientSettings::default()
        };
        assert!(matches!(
            settings.api_base_url(),
            Err(DomainError::InvalidUrl(_))
        ));
    }

    #[test]
    fn callback_path_is_normalized() {
        let settings = ClientSettings {
            callback_path: "oauth/callback".to_string(),
            ..ClientSettings::default()
        };
        assert_eq!(settings.normalized_callback_path(), "/oauth/callback");
    }
}
