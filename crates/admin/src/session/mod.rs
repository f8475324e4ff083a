//! Session store.
//!
//! The bearer token and the cached user record live in a small key/value
//! document under the keys in [`keys`](crate::models::session::keys). Both
//! keys are written and cleared together. Every screen reads the session
//! through a shared [`SessionContext`], so a sign-out is visible to all of
//! them on their next read.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::models::session::{SessionUser, keys};

/// Errors raised by a session backend.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed session document: {0}")]
    Serde(#[from] serde_json::Error),
}

/// String key/value storage in the manner of browser local storage.
pub trait SessionBackend: Send + Sync {
    /// Read a key.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the underlying storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Write several keys at once.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the underlying storage cannot be written.
    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), SessionStoreError>;

    /// Remove several keys at once. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the underlying storage cannot be written.
    fn remove_items(&self, keys: &[&str]) -> Result<(), SessionStoreError>;
}

/// The current sign-in.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    /// Absent when the cached record is missing or unreadable.
    pub user: Option<SessionUser>,
}

/// Shared handle to the session store.
#[derive(Clone)]
pub struct SessionContext {
    backend: Arc<dyn SessionBackend>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// An empty in-memory session.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    /// Read the current session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backend cannot be read.
    pub fn get(&self) -> Result<Option<Session>, SessionStoreError> {
        let Some(token) = self.backend.get_item(keys::ADMIN_TOKEN)? else {
            return Ok(None);
        };
        if token.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Session {
            token: SecretString::from(token),
            user: self.user()?,
        }))
    }

    /// The bearer token, if signed in.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backend cannot be read.
    pub fn token(&self) -> Result<Option<SecretString>, SessionStoreError> {
        Ok(self.get()?.map(|s| s.token))
    }

    /// The cached user record.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backend cannot be read.
    pub fn user(&self) -> Result<Option<SessionUser>, SessionStoreError> {
        let Some(raw) = self.backend.get_item(keys::ADMIN_USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cached user record");
                Ok(None)
            }
        }
    }

    /// Whether a token is stored. Storage failures count as signed out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self.token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Session store unreadable");
                false
            }
        }
    }

    /// Persist a new sign-in.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the user cannot be serialized or the
    /// backend cannot be written.
    pub fn set(&self, token: &SecretString, user: &SessionUser) -> Result<(), SessionStoreError> {
        let user = serde_json::to_string(user)?;
        self.backend.set_items(&[
            (keys::ADMIN_TOKEN, token.expose_secret()),
            (keys::ADMIN_USER, &user),
        ])
    }

    /// Replace the cached user record, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the user cannot be serialized or the
    /// backend cannot be written.
    pub fn update_user(&self, user: &SessionUser) -> Result<(), SessionStoreError> {
        let user = serde_json::to_string(user)?;
        self.backend.set_items(&[(keys::ADMIN_USER, &user)])
    }

    /// Remove both keys.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backend cannot be written.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        self.backend
            .remove_items(&[keys::ADMIN_TOKEN, keys::ADMIN_USER])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn admin() -> SessionUser {
        serde_json::from_value(json!({"id": 1, "firstname": "Asha", "sys_admin": 1})).unwrap()
    }

    #[test]
    fn test_set_get_clear() {
        let session = SessionContext::in_memory();
        assert!(session.get().unwrap().is_none());
        assert!(!session.is_authenticated());

        session.set(&SecretString::from("tok"), &admin()).unwrap();
        let current = session.get().unwrap().unwrap();
        assert_eq!(current.token.expose_secret(), "tok");
        assert_eq!(current.user.unwrap().firstname.as_deref(), Some("Asha"));

        session.clear().unwrap();
        assert!(session.get().unwrap().is_none());
        assert!(session.user().unwrap().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionContext::in_memory();
        let other = session.clone();
        session.set(&SecretString::from("tok"), &admin()).unwrap();
        assert!(other.is_authenticated());
        other.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_update_user_keeps_token() {
        let session = SessionContext::in_memory();
        session.set(&SecretString::from("tok"), &admin()).unwrap();
        let mut user = admin();
        user.city = Some("Pune".to_string());
        session.update_user(&user).unwrap();
        let current = session.get().unwrap().unwrap();
        assert_eq!(current.token.expose_secret(), "tok");
        assert_eq!(current.user.unwrap().city.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_unreadable_user_is_absent() {
        let backend = MemoryBackend::default();
        backend
            .set_items(&[(keys::ADMIN_TOKEN, "tok"), (keys::ADMIN_USER, "{not json")])
            .unwrap();
        let session = SessionContext::new(backend);
        let current = session.get().unwrap().unwrap();
        assert!(current.user.is_none());
    }
}
