//! In-memory key-value storage.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StorageError;

/// Process-local storage backed by a `HashMap`.
///
/// Can be switched into failure modes to stand in for a disabled
/// storage area or one that has run out of quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    reads_fail: Cell<bool>,
    writes_fail: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store where every operation fails, like storage disabled by the host.
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.reads_fail.set(true);
        store.writes_fail.set(true);
        store
    }

    /// Make subsequent writes fail (quota exceeded) or succeed again.
    pub fn set_writes_fail(&self, fail: bool) {
        self.writes_fail.set(fail);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.reads_fail.get() {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.writes_fail.get() {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.writes_fail.get() {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn failing_writes_leave_data_untouched() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.set_writes_fail(true);
        assert!(store.set("k", "other").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn unavailable_store_fails_everything() {
        let store = MemoryStore::unavailable();
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
        assert_eq!(store.len(), 0);
    }
}
