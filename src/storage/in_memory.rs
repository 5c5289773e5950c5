//! InMemoryStorage - HashMap-backed storage for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{StorageBackend, StorageError};

/// In-memory key/value storage.
///
/// Clone-friendly via Arc; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(storage.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;
        Ok(storage.remove(key).is_some())
    }
}
