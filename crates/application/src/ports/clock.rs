//! Clock port

use chrono::{DateTime, Utc};

/// Source of the current time for token expiry checks.
///
/// Tests pin it to a fixed instant to classify tokens deterministically.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}
