//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod auth_api;
mod callback;
mod cancellation;
mod clock;
mod navigator;
mod session_store;

pub use auth_api::{ApiError, ApiResult, AuthApi};
pub use callback::CallbackHandler;
pub use cancellation::{CancellationReceiver, CancellationToken};
pub use clock::Clock;
pub use navigator::{NavigationError, Navigator};
pub use session_store::{SessionError, SessionStore};
