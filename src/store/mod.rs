//! Entity stores - one domain's collection kept in step with its backend.
//!
//! The store loads (or seeds) the collection once when opened, and writes
//! the full collection back after every successful mutation. A mutation
//! whose write fails is rolled back in memory, so the in-memory collection
//! and the persisted one never diverge.
//!
//! ## Example
//!
//! ```ignore
//! use record_shelf::{InMemoryStorage, StorageExt, domains::inventory::InventoryItem};
//!
//! let mut store = InMemoryStorage::new().collection::<InventoryItem>()?;
//! let id = store.add(InventoryItem::new("USB-C cable", "CB-01", 3, 5, 19.9, "电子产品"))?;
//! store.adjust_quantity(id, 3)?;
//! ```

mod entity_store;
mod ext;
mod mutation;
mod options;

use std::fmt;

use crate::record::FieldError;
use crate::storage::StorageError;

/// Error type for entity store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend failed to read or write.
    Storage(StorageError),
    /// A field edit did not fit the record shape.
    Field(FieldError),
    /// The collection could not be serialized.
    Serde { collection: String, message: String },
    /// Stored data did not decode as a collection.
    Corrupted { collection: String, message: String },
    /// Category outside the domain vocabulary.
    UnknownCategory { collection: String, category: String },
    /// Confirmation token was never issued, or was already used.
    UnknownDeleteToken(u64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Storage(err) => write!(f, "{}", err),
            StoreError::Field(err) => write!(f, "{}", err),
            StoreError::Serde {
                collection,
                message,
            } => write!(f, "could not serialize {}: {}", collection, message),
            StoreError::Corrupted {
                collection,
                message,
            } => write!(f, "stored data for {} is corrupted: {}", collection, message),
            StoreError::UnknownCategory {
                collection,
                category,
            } => write!(f, "unknown category {:?} for {}", category, collection),
            StoreError::UnknownDeleteToken(token) => {
                write!(f, "unknown or already used delete token {}", token)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Storage(err) => Some(err),
            StoreError::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Storage(err)
    }
}

impl From<FieldError> for StoreError {
    fn from(err: FieldError) -> Self {
        StoreError::Field(err)
    }
}

pub use entity_store::{Bootstrap, EntityStore};
pub use ext::StorageExt;
pub use mutation::DeleteToken;
pub use options::{CorruptionPolicy, StoreOptions};
