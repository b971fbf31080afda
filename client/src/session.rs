//! Durable credential storage.
//!
//! Two artifacts live outside application state: the short-lived access
//! credential sent with each authenticated request, and the longer-lived
//! refresh artifact used to mint new access credentials. Both are written
//! and cleared only as a side effect of authentication transitions
//! (login, registration, logout, token refresh), never by reducers
//! directly.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Storage boundary for session credentials.
///
/// Implementations must tolerate concurrent access from effect tasks.
/// Failures to persist are logged, not surfaced: losing a credential
/// degrades to a fresh login, which must never block the state core.
pub trait CredentialStorage: Send + Sync {
    /// The current access credential, if a session exists
    fn access_token(&self) -> Option<String>;

    /// The current refresh artifact, if a session exists
    fn refresh_token(&self) -> Option<String>;

    /// Persist a freshly minted credential pair
    fn store(&self, access_token: &str, refresh_token: &str);

    /// Drop both artifacts
    fn clear(&self);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CredentialPair {
    access_token: String,
    refresh_token: String,
}

/// In-process credential storage. Used in tests and anywhere persistence
/// across restarts is not needed.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    inner: RwLock<Option<CredentialPair>>,
}

impl MemoryCredentials {
    /// Empty storage
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }
}

impl CredentialStorage for MemoryCredentials {
    fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|pair| pair.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|pair| pair.refresh_token.clone())
    }

    fn store(&self, access_token: &str, refresh_token: &str) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(CredentialPair {
            access_token: access_token.to_owned(),
            refresh_token: refresh_token.to_owned(),
        });
    }

    fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// File-backed credential storage: a small JSON file that survives
/// process restarts, the desktop analog of browser local storage.
#[derive(Debug)]
pub struct FileCredentials {
    path: PathBuf,
    // Cached copy; the file is only re-read at construction.
    cache: RwLock<Option<CredentialPair>>,
}

impl FileCredentials {
    /// Open storage at `path`, loading any previously saved pair.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = std::fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok());
        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    fn write_file(&self, pair: Option<&CredentialPair>) {
        let result = match pair {
            Some(pair) => serde_json::to_vec_pretty(pair)
                .map_err(std::io::Error::other)
                .and_then(|bytes| std::fs::write(&self.path, bytes)),
            None => match std::fs::remove_file(&self.path) {
                Err(error) if error.kind() != std::io::ErrorKind::NotFound => Err(error),
                _ => Ok(()),
            },
        };

        if let Err(error) = result {
            tracing::warn!(path = %self.path.display(), %error, "failed to persist credentials");
        }
    }
}

impl CredentialStorage for FileCredentials {
    fn access_token(&self) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|pair| pair.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|pair| pair.refresh_token.clone())
    }

    fn store(&self, access_token: &str, refresh_token: &str) {
        let pair = CredentialPair {
            access_token: access_token.to_owned(),
            refresh_token: refresh_token.to_owned(),
        };
        self.write_file(Some(&pair));
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(pair);
    }

    fn clear(&self) {
        self.write_file(None);
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
