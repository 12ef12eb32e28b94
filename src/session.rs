//! Durable session persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth store writes a [`PersistedSession`] projection after every state
//! change and reads it back at startup; HTTP transports read the token from the
//! same entry before each request. Backends are pluggable: browser
//! `localStorage` lives in the `client` crate, files and memory live here.
//!
//! DESIGN
//! ======
//! The stored value wraps the projection in a `{"state": ..., "version": 0}`
//! envelope so sessions written by the web front end and the CLI stay
//! interchangeable.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::types::User;

/// Storage key of the persisted auth session.
pub const SESSION_KEY: &str = "auth-storage";
pub const SESSION_VERSION: u32 = 0;

// =============================================================================
// STORAGE BACKENDS
// =============================================================================

/// Key-value backend for persisted session state.
///
/// Implementations are cheap handles: clones share the same backing store.
pub trait SessionStorage {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage; used by tests and non-browser renders.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

/// The session file holds a bearer token: owner read/write only.
#[cfg(unix)]
fn write_private(path: &Path, value: &str) -> std::io::Result<()> {
    use std::io::Write as _;
    use std::os::unix::fs::{OpenOptionsExt as _, PermissionsExt as _};

    let mut file = std::fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)?;
    // `mode` only applies on creation; tighten files left by older writes.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(value.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, value: &str) -> std::io::Result<()> {
    std::fs::write(path, value)
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        write_private(&self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// PERSISTED PROJECTION
// =============================================================================

/// The durable subset of auth state. Loading and error flags never persist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: PersistedSession,
    #[serde(default)]
    version: u32,
}

/// Read the persisted session, treating a missing or unreadable entry as an
/// anonymous session.
pub fn load_session<S: SessionStorage + ?Sized>(storage: &S) -> PersistedSession {
    let raw = match storage.load(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PersistedSession::default(),
        Err(e) => {
            tracing::warn!(error = %e, "session storage unreadable; starting anonymous");
            return PersistedSession::default();
        }
    };
    match serde_json::from_str::<Envelope>(&raw) {
        Ok(envelope) => envelope.state,
        Err(e) => {
            tracing::warn!(error = %e, "persisted session corrupt; starting anonymous");
            PersistedSession::default()
        }
    }
}

/// Write `session` under [`SESSION_KEY`].
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the backend write fails.
pub fn save_session<S: SessionStorage + ?Sized>(storage: &S, session: &PersistedSession) -> Result<(), StorageError> {
    let envelope = Envelope { state: session.clone(), version: SESSION_VERSION };
    let raw = serde_json::to_string(&envelope)?;
    storage.save(SESSION_KEY, &raw)
}

/// Bearer token of the persisted session, if one exists.
pub fn read_token<S: SessionStorage + ?Sized>(storage: &S) -> Option<String> {
    load_session(storage).token.filter(|token| !token.is_empty())
}

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
