use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// In-memory store backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage).
#[derive(Clone, Default)]
pub struct MemoryStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::LockPoisoned("slot read"))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::LockPoisoned("slot write"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
