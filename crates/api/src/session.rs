//! Persisted client session: the three keys the web client kept in local
//! storage (username, account id, role), stored here as one JSON document.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use duo_core::model::Session;

use crate::error::SessionStoreError;

/// Store contract for the signed-in session.
///
/// Populated at login/registration, cleared at logout, read once at mount.
pub trait SessionStore: Send + Sync {
    /// The stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` when the backing store cannot be read.
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Persist the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` when the backing store cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Forget the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` when the backing store cannot be cleared.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// File-backed store used by the desktop app.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&raw)?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Memory-backed store for tests and the view harness.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with a session.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duo_core::model::{AccountId, Role};

    fn session() -> Session {
        Session::new("benedict", AccountId::new(3), Role::User)
    }

    #[test]
    fn file_store_roundtrips_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());
        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clearing_a_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));
        store.clear().unwrap();
    }

    #[test]
    fn memory_store_roundtrips_session() {
        let store = InMemorySessionStore::new();
        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
