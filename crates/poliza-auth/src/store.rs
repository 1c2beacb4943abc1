//! Persistence for the client session.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use poliza_core::models::chat::ConversationThread;
use poliza_core::models::user::User;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Everything the client keeps between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<ConversationThread>,
}

impl StoredSession {
    pub fn is_empty(&self) -> bool {
        *self == StoredSession::default()
    }
}

pub trait SessionStore: Send + Sync {
    /// Read the stored session. Nothing stored yields an empty session.
    fn load(&self) -> Result<StoredSession, AuthError>;

    fn save(&self, session: &StoredSession) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;
}

/// `session.json` on disk, written with owner-only permissions.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/poliza/session.json`.
    pub fn in_config_dir() -> Result<Self, AuthError> {
        let base = dirs::config_dir()
            .ok_or_else(|| AuthError::Storage("no config directory found".to_string()))?;
        Ok(Self::new(base.join("poliza").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<StoredSession, AuthError> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let dir = self.path.parent().ok_or_else(|| {
            AuthError::Storage(format!("invalid session path {}", self.path.display()))
        })?;
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(session)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::info!(path = %self.path.display(), "session cleared");
        }
        Ok(())
    }
}

/// In-process store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<StoredSession>>,
}

impl MemoryStore {
    pub fn with(session: StoredSession) -> Self {
        Self {
            slot: Arc::new(Mutex::new(session)),
        }
    }

    pub fn contents(&self) -> StoredSession {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<StoredSession, AuthError> {
        self.slot
            .lock()
            .map(|s| s.clone())
            .map_err(|_| AuthError::Storage("session lock poisoned".to_string()))
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AuthError::Storage("session lock poisoned".to_string()))?;
        *slot = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.save(&StoredSession::default())
    }
}
