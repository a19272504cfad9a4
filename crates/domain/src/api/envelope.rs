//! The response envelope shared by every endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Decoded response body `{ success?, message?, error?, data? }`.
///
/// The contract belongs to the remote service; nothing is validated locally
/// and every field may be absent. A field of the wrong type reads as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ApiResponse<T = serde_json::Value> {
    /// Success flag reported by the service.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Human-readable success or failure message.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error description on failure.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Endpoint-specific payload.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            success: None,
            message: None,
            error: None,
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Returns true only when the service sent `success: true`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
    }

    /// The text to show the user: `message`, else `error`.
    ///
    /// Empty strings count as absent.
    #[must_use]
    pub fn display_message(&self) -> Option<&str> {
        non_empty(self.message.as_deref()).or_else(|| non_empty(self.error.as_deref()))
    }

    /// Like [`Self::display_message`], falling back to `fallback`.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.display_message().unwrap_or(fallback).to_string()
    }

    /// Returns the payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_partial_envelope() {
        let response: ApiResponse = serde_json::from_value(json!({ "error": "boom" })).unwrap();
        assert_eq!(response.success, None);
        assert!(!response.is_success());
        assert_eq!(response.display_message(), Some("boom"));
    }

    #[test]
    fn message_takes_precedence_over_error() {
        let response: ApiResponse = serde_json::from_value(json!({
            "success": false,
            "message": "first",
            "error": "second"
        }))
        .unwrap();
        assert_eq!(response.message_or("fallback"), "first");
    }

    #[test]
    fn empty_strings_fall_through() {
        let response: ApiResponse = serde_json::from_value(json!({
            "message": "",
            "error": ""
        }))
        .unwrap();
        assert_eq!(response.display_message(), None);
        assert_eq!(response.message_or("Erreur OAuth"), "Erreur OAuth");
        assert_eq!(response.message_or(""), "");
    }

    #[test]
    fn null_data_is_absent() {
        let response: ApiResponse = serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(response.data().is_none());
    }
}
