//! Page state machines for UI binding.

use serde::{Deserialize, Serialize};

/// State of a credential form (login or registration).
///
/// `Idle → Submitting → {Succeeded, Failed}`; a new submission may start
/// from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Submitting,
    /// The service reported success.
    Succeeded,
    /// Local validation, transport or the service reported failure.
    Failed,
}

/// State of the "link a Google account" action on the login page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GoogleLinkState {
    /// Not triggered.
    #[default]
    Idle,
    /// No stored token; stopped before any network call.
    Blocked,
    /// Waiting for the initiation response.
    Requesting,
    /// Handed off to the provider.
    Redirecting {
        /// The consent URL.
        auth_url: String,
    },
    /// The initiation response carried no URL.
    Failed,
}

/// State of the OAuth callback page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackState {
    /// Mounted; checks or the code exchange are under way.
    #[default]
    Processing,
    /// The query had no authorization code.
    MissingCode,
    /// No stored token.
    NotSignedIn,
    /// Account linked; navigation home is scheduled.
    Linked,
    /// Navigated home after the pause.
    Redirected,
    /// The exchange failed.
    Failed,
}

impl CallbackState {
    /// Returns true once the page will not change by itself anymore.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::MissingCode | Self::NotSignedIn | Self::Redirected | Self::Failed
        )
    }
}
