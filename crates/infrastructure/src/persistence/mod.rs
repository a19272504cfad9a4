//! On-disk persistence for the session token and client settings.

mod session_store;
mod settings_repository;

pub use session_store::FileSessionStore;
pub use settings_repository::{
    ENV_API_URL, ENV_CALLBACK_ADDR, SettingsError, SettingsRepository, apply_overrides,
};
