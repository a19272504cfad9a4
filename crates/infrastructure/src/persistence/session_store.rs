//! File-backed session store.
//!
//! The token lives in the platform data directory:
//! - Linux: ~/.local/share/tamis/session.json
//! - macOS: ~/Library/Application Support/tamis/session.json
//! - Windows: %APPDATA%/tamis/session.json

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tamis_application::{SessionError, SessionStore};
use tamis_domain::BearerToken;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::serialization::{from_json_bytes, to_json_file_bytes};

/// On-disk layout: one fixed key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jwt: Option<String>,
}

/// Session store persisting the token as `{ "jwt": "<token>" }`.
///
/// A missing or empty file means "no token". On Unix the file is readable
/// by its owner only.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default per-user location.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoDataDir`] if the platform has no data directory.
    pub fn default_location() -> Result<Self, SessionError> {
        dirs::data_dir()
            .map(|dir| Self::new(dir.join("tamis").join("session.json")))
            .ok_or(SessionError::NoDataDir)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<Option<SessionFile>, SessionError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        from_json_bytes(&bytes)
            .map(Some)
            .map_err(|e| SessionError::Corrupt(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<BearerToken>, SessionError> {
        let Some(file) = self.read_file().await? else {
            return Ok(None);
        };
        Ok(file.jwt.and_then(|raw| BearerToken::new(raw).ok()))
    }

    async fn save(&self, token: &BearerToken) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_file_bytes(&SessionFile {
            jwt: Some(token.as_str().to_string()),
        })
        .map_err(|e| SessionError::Corrupt(e.to_string()))?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path).await?;

        // `mode` only applies on creation; an older file keeps its bits.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await?;
        }

        file.write_all(&content).await?;
        file.flush().await?;

        tracing::debug!(path = %self.path.display(), "session file written");
        Ok(())
    }

    async fn clear(&self) -> Result<bool, SessionError> {
        let existed = match self.load().await {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "discarding unreadable session file"
                );
                true
            }
        };
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(SessionError::Io(e)),
        }
        Ok(existed)
    }
}
