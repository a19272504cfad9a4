//! Query parameters delivered to the OAuth callback page.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{AuthorizationCode, DomainError, DomainResult};

/// Parameters the provider appends when redirecting back.
///
/// Two queries are equal when all three parameters match; the callback
/// page uses that to run at most once per distinct query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// State echoed back from initiation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Provider-side error, e.g. `access_denied`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallbackQuery {
    /// A query carrying only a code.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Parses either a full redirect URL or a bare query string
    /// (with or without the leading `?`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or the query string is malformed.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let input = input.trim();
        if input.contains("://") {
            let url = Url::parse(input).map_err(|e| DomainError::InvalidUrl(e.to_string()))?;
            return Self::from_query_string(url.query().unwrap_or_default());
        }
        Self::from_query_string(input.trim_start_matches('?'))
    }

    fn from_query_string(query: &str) -> DomainResult<Self> {
        serde_urlencoded::from_str(query)
            .map_err(|e| DomainError::InvalidCallbackQuery(e.to_string()))
    }

    /// The authorization code, treating an empty value as absent.
    #[must_use]
    pub fn code(&self) -> Option<AuthorizationCode> {
        self.code
            .as_deref()
            .and_then(|c| AuthorizationCode::new(c).ok())
    }

    /// Whether the provider has answered, either way.
    #[must_use]
    pub fn is_provider_response(&self) -> bool {
        self.code().is_some() || self.error.is_some()
    }
}
