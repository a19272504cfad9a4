//! Remote authentication API types
//!
//! The remote service answers every endpoint with the same JSON envelope;
//! only the shape of `data` varies per endpoint.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};

mod envelope;
mod payload;

pub use envelope::ApiResponse;
pub use payload::{
    CompleteOAuthRequest, HealthData, LoginData, LoginRequest, OAuthInitiateData, RefreshData,
    RefreshRequest, RegisterData, RegisterRequest, User,
};

/// Reads an optional field, yielding `None` when the value has the wrong
/// shape instead of failing the whole body.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
