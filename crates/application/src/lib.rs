//! Tamis Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (the remote auth API, session storage, navigation)
//! - The explicit `Session` context object
//! - Use case orchestration for login, registration and Google linking
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    ApiError, ApiResult, AuthApi, CallbackHandler, CancellationReceiver, CancellationToken,
    NavigationError, Navigator, SessionError, SessionStore,
};
pub use session::{MemorySessionStore, Session};
pub use use_cases::{
    CallbackOutcome, CheckHealth, CompleteGoogleLink, FetchProfile, HealthOutcome,
    InitiateGoogleLink, LinkOutcome, Login, LoginOutcome, Logout, ProfileOutcome, RefreshOutcome,
    RefreshSession, Register, RegisterOutcome,
};
