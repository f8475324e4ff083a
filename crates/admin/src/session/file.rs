//! Session backend persisted as a JSON document on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{SessionBackend, SessionStoreError};

/// Session storage in a JSON object file, e.g. `~/.storedesk/session.json`.
///
/// The file is created on first write with owner-only permissions on Unix.
/// A missing file reads as an empty session.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    lock: Mutex<()>,
}

type Document = BTreeMap<String, String>;

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, SessionStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Document::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, document: &Document) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, raw)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Document)) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut document = self.load()?;
        f(&mut document);
        self.save(&document)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl SessionBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<(), SessionStoreError> {
        self.modify(|document| {
            for (key, value) in entries {
                document.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), SessionStoreError> {
        self.modify(|document| {
            for key in keys {
                document.remove(*key);
            }
        })
    }
}
