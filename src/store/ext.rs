//! StorageExt - open typed stores straight from a backend.

use super::{EntityStore, StoreError};
use crate::record::Seeded;
use crate::storage::StorageBackend;

/// Extension trait for opening a seeded entity store on any backend.
pub trait StorageExt: StorageBackend + Sized {
    /// Open the store for `R`, seeding it with `R::defaults()` on first use.
    fn collection<R: Seeded>(self) -> Result<EntityStore<R, Self>, StoreError> {
        EntityStore::open(self)
    }
}

impl<B: StorageBackend> StorageExt for B {}
