// Lets `#[derive(Record)]` expand to `record_shelf::...` paths inside this crate too.
extern crate self as record_shelf;

pub mod aggregate;
pub mod domains;
#[cfg(feature = "emitter")]
pub mod emitter;
mod filter;
mod record;
mod storage;
mod store;

pub use aggregate::{Aggregate, CategoryCounts};
#[cfg(feature = "emitter")]
pub use emitter::{ChangeEmitter, ChangeKind};
pub use filter::{Filter, View};
pub use record::{
    is_known_category, FieldError, Patch, Record, RecordId, Seeded, Stocked, WILDCARD,
};
pub use storage::{FileStorage, InMemoryStorage, StorageBackend, StorageConfig, StorageError};
pub use store::{
    Bootstrap, CorruptionPolicy, DeleteToken, EntityStore, StorageExt, StoreError, StoreOptions,
};

// Derive macro; lives in the macro namespace alongside the `Record` trait.
pub use record_shelf_macros::Record;
