//! Persisted key-value storage.
//!
//! The widget writes through [`KeyValueStore`] so the browser's
//! `localStorage` can be swapped for [`MemoryStore`] when it is unavailable
//! (and in tests). [`ResultStore`] layers the three keys the rest of the
//! application reads on top of it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::config::storage_keys;
use crate::error::{StorageError, StorageResult};

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Read a value, `None` if absent.
    fn get_item(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Delete a value. Missing keys are ignored.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// Shared handle used by components.
pub type SharedStore = Rc<dyn KeyValueStore>;

// =============================================================================
// Browser localStorage
// =============================================================================

/// `window.localStorage` wrapper.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the origin's local storage.
    pub fn open() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}

// =============================================================================
// In-memory fallback
// =============================================================================

/// Session-only store, lost on reload.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser local storage, or an in-memory store if it cannot be opened.
pub fn open_store() -> SharedStore {
    match LocalStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            log::warn!("⚠️  {} - results will not survive a reload", e);
            Rc::new(MemoryStore::new())
        }
    }
}

// =============================================================================
// Analysis results
// =============================================================================

/// Typed access to the persisted analysis results.
#[derive(Clone)]
pub struct ResultStore<S> {
    store: S,
}

impl<S: KeyValueStore> ResultStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Last parsed resume, if one was stored and is valid JSON.
    pub fn parsed_data(&self) -> Option<Value> {
        let raw = self.store.get_item(storage_keys::PARSED_DATA)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save_parsed_data(&self, data: &Value) -> StorageResult<()> {
        let json = serde_json::to_string(data)?;
        self.store.set_item(storage_keys::PARSED_DATA, &json)
    }

    /// Number of successful analyses; unreadable values count as zero.
    pub fn analyzed_count(&self) -> u64 {
        self.store
            .get_item(storage_keys::ANALYZED_COUNT)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Increment the persisted count and return the new value.
    ///
    /// Read-then-write: two tabs finishing together can lose an increment.
    pub fn increment_analyzed_count(&self) -> StorageResult<u64> {
        let next = self.analyzed_count().saturating_add(1);
        self.store
            .set_item(storage_keys::ANALYZED_COUNT, &next.to_string())?;
        Ok(next)
    }

    pub fn last_file_name(&self) -> Option<String> {
        self.store.get_item(storage_keys::LAST_FILE_NAME)
    }

    pub fn save_last_file_name(&self, name: &str) -> StorageResult<()> {
        self.store.set_item(storage_keys::LAST_FILE_NAME, name)
    }

    /// Forget every stored result.
    ///
    /// Every key is attempted; the first failure is reported.
    pub fn clear(&self) -> StorageResult<()> {
        [
            storage_keys::PARSED_DATA,
            storage_keys::ANALYZED_COUNT,
            storage_keys::LAST_FILE_NAME,
        ]
        .map(|key| self.store.remove_item(key))
        .into_iter()
        .collect()
    }

    /// Underlying key-value store.
    pub fn inner(&self) -> &S {
        &self.store
    }
}
