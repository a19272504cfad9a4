//! Session status derived from the stored token.

use chrono::{DateTime, Utc};

use super::BearerToken;

/// Status of the stored credential for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No token is stored.
    NotAuthenticated,
    /// Token is valid and not expiring soon.
    Valid {
        /// Seconds until expiry, or None if the token carries no expiry.
        seconds_remaining: Option<i64>,
    },
    /// Token is valid but will expire soon.
    Expiring {
        /// Seconds until expiry.
        seconds_remaining: i64,
    },
    /// Token has expired.
    Expired,
}

impl TokenStatus {
    /// Evaluates `token` at `now`, flagging tokens within `buffer_seconds`
    /// of expiry as expiring.
    #[must_use]
    pub fn evaluate(token: Option<&BearerToken>, now: DateTime<Utc>, buffer_seconds: i64) -> Self {
        let Some(token) = token else {
            return Self::NotAuthenticated;
        };
        let Some(expires_at) = token.expires_at() else {
            return Self::Valid {
                seconds_remaining: None,
            };
        };

        let remaining = (expires_at - now).num_seconds();
        if remaining <= 0 {
            Self::Expired
        } else if remaining <= buffer_seconds {
            Self::Expiring {
                seconds_remaining: remaining,
            }
        } else {
            Self::Valid {
                seconds_remaining: Some(remaining),
            }
        }
    }

    /// Returns true if a usable token is stored.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. } | Self::Expiring { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Non connecté".to_string(),
            Self::Valid {
                seconds_remaining: Some(secs),
            } => {
                if *secs > 3600 {
                    format!("Session valide encore {} heures", secs / 3600)
                } else if *secs > 60 {
                    format!("Session valide encore {} minutes", secs / 60)
                } else {
                    format!("Session valide encore {secs} secondes")
                }
            }
            Self::Valid {
                seconds_remaining: None,
            } => "Session active (expiration inconnue)".to_string(),
            Self::Expiring { seconds_remaining } => {
                format!("Session expirant dans {seconds_remaining} secondes")
            }
            Self::Expired => "Session expirée".to_string(),
        }
    }
}
