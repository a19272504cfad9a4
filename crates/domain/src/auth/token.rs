//! Bearer tokens and OAuth authorization codes.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult};

/// An opaque bearer credential issued by the service at login.
///
/// `Debug` only shows a short preview so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyToken`] for empty or whitespace input.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyToken);
        }
        Ok(Self(raw))
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// First eight characters followed by an ellipsis.
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.chars().count() > 12 {
            let head: String = self.0.chars().take(8).collect();
            format!("{head}...")
        } else {
            "***".to_string()
        }
    }

    /// Decodes the JWT payload, if the token is a JWT.
    ///
    /// The signature is not verified; claims are for display only.
    #[must_use]
    pub fn claims(&self) -> Option<TokenClaims> {
        let mut parts = self.0.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Expiry time from the `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims()
            .and_then(|c| c.exp)
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&self.preview()).finish()
    }
}

impl TryFrom<String> for BearerToken {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BearerToken> for String {
    fn from(token: BearerToken) -> Self {
        token.0
    }
}

/// Subset of JWT claims the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at as seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Account email, when the service embeds it.
    #[serde(default)]
    pub email: Option<String>,
}

/// A single-use authorization code delivered by the OAuth provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    /// Wraps a raw code.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyCode`] for an empty string.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::EmptyCode);
        }
        Ok(Self(raw))
    }

    /// The raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthorizationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthorizationCode(***)")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jwt(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn rejects_blank_tokens() {
        assert_eq!(BearerToken::new("  "), Err(DomainError::EmptyToken));
        assert!(BearerToken::new("T").is_ok());
    }

    #[test]
    fn authorization_header_uses_bearer_scheme() {
        let token = BearerToken::new("abc").unwrap();
        assert_eq!(token.authorization_header(), "Bearer abc");
    }

    #[test]
    fn debug_never_prints_the_token() {
        let token = BearerToken::new("abcdefghijklmnopqrstuvwxyz").unwrap();
        let rendered = format!("{token:?}");
        assert_eq!(rendered, "BearerToken(\"abcdefgh...\")");

        let short = BearerToken::new("short").unwrap();
        assert!(!format!("{short:?}").contains("short"));
    }

    #[test]
    fn reads_expiry_from_jwt() {
        let token = BearerToken::new(jwt(&serde_json::json!({
            "exp": 1_700_000_000,
            "email": "a@b.c"
        })))
        .unwrap();

        let claims = token.claims().unwrap();
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
        assert_eq!(token.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn opaque_tokens_have_no_claims() {
        let token = BearerToken::new("not-a-jwt").unwrap();
        assert!(token.claims().is_none());
        assert!(token.expires_at().is_none());
    }

    #[test]
    fn empty_code_is_rejected() {
        assert_eq!(AuthorizationCode::new(""), Err(DomainError::EmptyCode));
        assert_eq!(AuthorizationCode::new("4/abc").unwrap().as_str(), "4/abc");
    }
}
