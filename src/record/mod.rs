//! Records - the typed rows held by an entity store.
//!
//! Every record carries a store-assigned integer id and exactly one
//! category field used for filtering. Everything else is domain data.
//!
//! ## Example
//!
//! ```ignore
//! use record_shelf::{Record, RecordId};
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(collection = "u-links-data", categories = &["全部", "工作"])]
//! struct Bookmark {
//!     id: RecordId,
//!     #[record(search)]
//!     name: String,
//!     category: String,
//! }
//! ```

mod fields;

use serde::{de::DeserializeOwned, Serialize};

pub use fields::{FieldError, Patch};
pub(crate) use fields::{apply_patch, flip_bool};

/// Store-assigned record identifier.
pub type RecordId = u64;

/// The "show all" category value accepted by every domain.
pub const WILDCARD: &str = "全部";

/// Trait for types that can be held in an entity store.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The persistence key for this record type (e.g., "u-habits-data").
    const COLLECTION: &'static str;

    /// Fixed category vocabulary, wildcard included.
    const CATEGORIES: &'static [&'static str];

    fn id(&self) -> RecordId;

    /// Only the store calls this; ids are never user-supplied.
    fn set_id(&mut self, id: RecordId);

    fn category(&self) -> &str;

    /// Text fields matched by the free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// Hook run after `field` was flipped to `now` by a toggle.
    ///
    /// Domains use this to keep dependent counters in step with a flag.
    fn on_toggle(&mut self, _field: &str, _now: bool) {}
}

/// Records that ship a default collection for first launch.
pub trait Seeded: Record {
    fn defaults() -> Vec<Self>;

    /// Category selected when the store opens.
    fn initial_category() -> &'static str {
        WILDCARD
    }
}

/// Records with a stock quantity that must never go negative.
pub trait Stocked: Record {
    fn quantity(&self) -> u32;

    fn set_quantity(&mut self, quantity: u32);

    fn min_stock(&self) -> u32;

    /// Evaluated on demand, never stored on the record.
    fn is_low_stock(&self) -> bool {
        self.quantity() <= self.min_stock()
    }
}

/// Returns true if `category` is part of `R`'s vocabulary or is the wildcard.
pub fn is_known_category<R: Record>(category: &str) -> bool {
    category == WILDCARD || category.is_empty() || R::CATEGORIES.contains(&category)
}
