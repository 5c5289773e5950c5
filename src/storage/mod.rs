//! Storage - durable key/value backends holding serialized collections.
//!
//! A backend maps a collection key (e.g. `"u-inventory-data"`) to the full
//! serialized collection. Every write is a whole-value overwrite; backends
//! must make each write atomic from the caller's point of view.
//!
//! ## Example
//!
//! ```ignore
//! use record_shelf::{FileStorage, StorageBackend, StorageConfig};
//!
//! let storage = FileStorage::open(StorageConfig::from_env())?;
//! storage.write("u-links-data", "[]")?;
//! assert_eq!(storage.read("u-links-data")?.as_deref(), Some("[]"));
//! ```

mod config;
mod file;
mod in_memory;

use std::fmt;
use std::sync::Arc;

/// Abstract durable storage for serialized collections.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`. Returns None if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Returns true if it existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
}

/// Error type for storage backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Underlying I/O failed for the given key.
    Io { key: String, message: String },
    /// A lock guarding in-process storage was poisoned.
    LockPoisoned(&'static str),
    /// The key cannot be mapped onto the backend.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { key, message } => {
                write!(f, "storage I/O error for {}: {}", key, message)
            }
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
            StorageError::InvalidKey(key) => write!(f, "invalid storage key {:?}", key),
        }
    }
}

impl std::error::Error for StorageError {}

pub use config::StorageConfig;
pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
