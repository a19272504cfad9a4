//! Client settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux/macOS: ~/.config/tamis/settings.json
//! - Windows: %APPDATA%/tamis/settings.json
//!
//! Environment variables override the file.

use std::path::PathBuf;

use tamis_domain::ClientSettings;
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes, to_json_file_bytes};

/// Overrides [`ClientSettings::api_url`].
pub const ENV_API_URL: &str = "TAMIS_API_URL";

/// Overrides [`ClientSettings::callback_addr`].
pub const ENV_CALLBACK_ADDR: &str = "TAMIS_CALLBACK_ADDR";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for client settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsRepository {
    /// Creates a repository at the default per-user location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join("tamis").join("settings.json")),
        }
    }

    /// Creates a repository backed by `path`.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the path where settings are stored, if available.
    #[must_use]
    pub const fn settings_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist. Missing keys take
    /// their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(ClientSettings::default());
        };

        match fs::read(path).await {
            Ok(content) => Ok(from_json_bytes(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientSettings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads settings and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed.
    pub async fn load_with_env(&self) -> Result<ClientSettings, SettingsError> {
        let mut settings = self.load().await?;
        apply_overrides(&mut settings, |name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no config directory or the file cannot
    /// be written.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, to_json_file_bytes(settings)?).await?;

        Ok(())
    }
}

/// Applies environment overrides looked up through `lookup`.
///
/// Empty values are ignored.
pub fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_URL) {
        tracing::debug!(%url, "API URL overridden from environment");
        settings.api_url = url;
    }
    if let Some(addr) = non_empty(ENV_CALLBACK_ADDR) {
        settings.callback_addr = addr;
    }
}
