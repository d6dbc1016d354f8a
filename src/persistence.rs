//! Full-snapshot persistence of an entity collection into one named storage slot.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::actor_framework::Entity;
use crate::storage::{KeyValueStore, StorageError};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read snapshot {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: StorageError,
    },
    #[error("failed to write snapshot {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: StorageError,
    },
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// A named slot holding the serialized collection. The whole collection is
/// written on every save.
#[derive(Clone)]
pub struct SnapshotSlot {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SnapshotSlot {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the snapshot. `Ok(None)` means the slot was never written.
    pub fn load<T: Entity>(&self) -> Result<Option<Vec<T>>, PersistenceError> {
        let raw = self.store.get(&self.key).map_err(|source| PersistenceError::Read {
            key: self.key.clone(),
            source,
        })?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let items: Vec<T> = serde_json::from_str(&raw)?;
        check_snapshot(&items)?;
        debug!(key = %self.key, count = items.len(), "Snapshot loaded");
        Ok(Some(items))
    }

    pub fn save<T: Entity>(&self, items: &[T]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(items)?;
        self.store
            .set(&self.key, &raw)
            .map_err(|source| PersistenceError::Write {
                key: self.key.clone(),
                source,
            })?;
        debug!(key = %self.key, count = items.len(), "Snapshot saved");
        Ok(())
    }
}

/// Every item must carry a valid identifier, and neither identifiers nor unique
/// keys may repeat.
pub fn check_snapshot<T: Entity>(items: &[T]) -> Result<(), PersistenceError> {
    let mut ids = HashSet::with_capacity(items.len());
    let mut keys = HashSet::with_capacity(items.len());
    for item in items {
        if !item.has_valid_id() {
            return Err(PersistenceError::InvalidSnapshot(format!("invalid identifier {}", item.id())));
        }
        if !ids.insert(item.id()) {
            return Err(PersistenceError::InvalidSnapshot(format!("duplicate identifier {}", item.id())));
        }
        if let Some(key) = item.unique_key() {
            if !keys.insert(key) {
                return Err(PersistenceError::InvalidSnapshot(format!("duplicate key {key}")));
            }
        }
    }
    Ok(())
}
