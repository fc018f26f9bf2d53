//! Persistence Adapter
//!
//! Serializes the task collection as a JSON array into one named key-value
//! slot. Slot backends are abstract so the browser and tests can plug in
//! their own storage.

use std::collections::HashMap;

use crate::error::StorageError;
use crate::models::TaskRecord;
use crate::task_store::TaskStore;

/// Key-value slot storage
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when it was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    /// Open local storage. A missing or blocked storage is not fatal: every
    /// read and write then fails with `StorageError::Unavailable`.
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|win| win.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!(target: "storage", "localStorage unavailable, changes will not survive a reload");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

/// In-memory slots
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    /// Make every write fail, to exercise save-error handling
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }

    /// A store whose writes always fail
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write(key.to_string()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the task collection through a single slot
pub struct TaskPersistence<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> TaskPersistence<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Overwrite the slot with the full collection
    pub fn save(&mut self, store: &TaskStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(&store.records())?;
        self.backend.set(&self.key, &json)
    }

    /// Strict read. An empty slot counts as never written.
    pub fn try_load(&self) -> Result<Option<Vec<TaskRecord>>, StorageError> {
        match self.backend.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    /// Startup read. Anything unreadable starts an empty list.
    pub fn load(&self) -> TaskStore {
        match self.try_load() {
            Ok(Some(records)) => {
                log::info!(target: "storage", "loaded {} tasks from slot {:?}", records.len(), self.key);
                TaskStore::from_records(records)
            }
            Ok(None) => {
                log::info!(target: "storage", "slot {:?} is empty, starting fresh", self.key);
                TaskStore::new()
            }
            Err(e) => {
                log::warn!(target: "storage", "ignoring stored tasks in {:?}: {}", self.key, e);
                TaskStore::new()
            }
        }
    }
}
