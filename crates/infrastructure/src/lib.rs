//! Tamis Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the local callback listener.

pub mod adapters;
pub mod callback;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestAuthApi, SystemNavigator};
pub use callback::{BoundCallbackServer, CallbackServer, CallbackServerError};
pub use persistence::{
    ENV_API_URL, ENV_CALLBACK_ADDR, FileSessionStore, SettingsError, SettingsRepository,
    apply_overrides,
};
pub use serialization::{SerializationError, from_json_bytes, to_json_file_bytes};
