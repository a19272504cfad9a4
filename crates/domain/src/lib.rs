//! Tamis Domain - Core authentication types
//!
//! This crate defines the domain model for the Tamis authentication client:
//! the remote API envelope and payloads, credentials, forms, page states and
//! client settings. All types here are pure Rust with no I/O dependencies.

pub mod api;
pub mod auth;
pub mod callback;
pub mod error;
pub mod forms;
pub mod messages;
pub mod settings;
pub mod state;

pub use api::{
    ApiResponse, CompleteOAuthRequest, HealthData, LoginData, LoginRequest, OAuthInitiateData,
    RefreshData, RefreshRequest, RegisterData, RegisterRequest, User,
};
pub use auth::{AuthorizationCode, BearerToken, TokenClaims, TokenStatus};
pub use callback::CallbackQuery;
pub use error::{DomainError, DomainResult};
pub use forms::{LoginForm, RegisterForm};
pub use settings::ClientSettings;
pub use state::{CallbackState, FormState, GoogleLinkState};
