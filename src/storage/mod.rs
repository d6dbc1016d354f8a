//! Local key-value persistence for catalog snapshots.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string-valued store addressed by named slots. Writes replace the whole value.
pub trait KeyValueStore: Send + Sync {
    /// Reads the slot, returning `None` if nothing was ever written to it.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the slot.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
