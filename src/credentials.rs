//! Credential storage for the bearer token attached to authorized requests
//!
//! The store is an explicitly injected capability rather than module-level
//! global state, so the pipeline stays testable. It holds a single slot with
//! the most recent auth token: written after a successful login, read before
//! each authorized request, cleared only by an explicit logout.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// A single string-keyed slot holding the most recent auth token
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: String);
    fn clear(&self);
}

/// Process-wide in-memory slot; persists across screen navigation
#[derive(Default)]
pub struct InMemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, token: String) {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
    }

    fn clear(&self) {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// Token slot backed by a file, surviving process restarts
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the user's data directory
    pub fn default_location() -> Option<Self> {
        directories::ProjectDirs::from("io", "autolot", "autolot-client")
            .map(|dirs| Self::new(dirs.data_dir().join("token")))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(token) if !token.is_empty() => Some(token),
            _ => None,
        }
    }

    fn set(&self, token: String) {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                tracing::warn!(%error, "failed to create token directory");
                return;
            }
        }
        if let Err(error) = fs::write(&self.path, token) {
            tracing::warn!(%error, "failed to persist token");
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(error) = fs::remove_file(&self.path) {
                tracing::warn!(%error, "failed to clear token");
            }
        }
    }
}
