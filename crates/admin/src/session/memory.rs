//! In-memory session backend for tests and one-off embedding.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::{SessionBackend, SessionStoreError};

/// Session storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: Mutex<BTreeMap<String, String>>,
}

impl SessionBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<(), SessionStoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in entries {
            items.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), SessionStoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}
