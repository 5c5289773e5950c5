//! EntityStore - bootstrap, reads, filtering and write-through commit.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use super::mutation::DeleteToken;
use super::{CorruptionPolicy, StoreError, StoreOptions};
use crate::aggregate::Aggregate;
#[cfg(feature = "emitter")]
use crate::emitter::{ChangeEmitter, ChangeKind};
use crate::filter::{Filter, View};
use crate::record::{is_known_category, Record, RecordId, Seeded};
use crate::storage::StorageBackend;

/// How the collection came into memory when the store opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// Decoded from the backend.
    Loaded,
    /// Nothing was stored; the seed set was written.
    Seeded,
    /// Stored data was corrupt; the seed set replaced it.
    Reseeded,
}

impl Bootstrap {
    fn as_str(self) -> &'static str {
        match self {
            Bootstrap::Loaded => "loaded",
            Bootstrap::Seeded => "seeded",
            Bootstrap::Reseeded => "reseeded",
        }
    }
}

/// One domain's ordered collection, mirrored to a storage backend.
///
/// The store is the single writer of its collection key. Every mutation
/// rewrites the full collection; see the mutation methods for details.
pub struct EntityStore<R: Record, B: StorageBackend> {
    pub(super) backend: B,
    pub(super) items: Vec<R>,
    pub(super) filter: Filter,
    pub(super) pending_deletes: HashMap<u64, RecordId>,
    pub(super) next_token: u64,
    seed: Vec<R>,
    bootstrap: Bootstrap,
    #[cfg(feature = "emitter")]
    pub(super) emitter: ChangeEmitter,
}

impl<R: Seeded, B: StorageBackend> EntityStore<R, B> {
    /// Open the store, seeding it with `R::defaults()` on first use.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let options = StoreOptions::new()
            .with_seed(R::defaults())
            .with_initial_category(R::initial_category());
        Self::open_with(backend, options)
    }
}

impl<R: Record, B: StorageBackend> EntityStore<R, B> {
    /// Open the store with explicit options.
    ///
    /// Reads the collection once. When nothing is stored, the seed set (empty
    /// unless given in `options`) becomes the collection and is written back
    /// immediately.
    pub fn open_with(backend: B, options: StoreOptions<R>) -> Result<Self, StoreError> {
        let StoreOptions {
            corruption,
            initial_category,
            seed,
        } = options;
        let seed = seed.unwrap_or_default();

        let mut filter = Filter::new();
        if let Some(category) = initial_category {
            if !is_known_category::<R>(&category) {
                return Err(unknown_category::<R>(category));
            }
            filter.set_category(category);
        }

        let (items, bootstrap) = match backend.read(R::COLLECTION)? {
            Some(raw) => match decode::<R>(&raw) {
                Ok(items) => (items, Bootstrap::Loaded),
                Err(message) => match corruption {
                    CorruptionPolicy::Fail => {
                        warn!(
                            "event=store_bootstrap collection={} status=corrupted policy=fail error={}",
                            R::COLLECTION,
                            message
                        );
                        return Err(StoreError::Corrupted {
                            collection: R::COLLECTION.to_string(),
                            message,
                        });
                    }
                    CorruptionPolicy::Reseed => {
                        warn!(
                            "event=store_bootstrap collection={} status=corrupted policy=reseed error={}",
                            R::COLLECTION,
                            message
                        );
                        let backup = backup_corrupt::<R, _>(&backend, &raw)?;
                        warn!(
                            "event=store_backup collection={} key={}",
                            R::COLLECTION,
                            backup
                        );
                        (seed.clone(), Bootstrap::Reseeded)
                    }
                },
            },
            None => (seed.clone(), Bootstrap::Seeded),
        };

        let store = Self {
            backend,
            items,
            filter,
            pending_deletes: HashMap::new(),
            next_token: 1,
            seed,
            bootstrap,
            #[cfg(feature = "emitter")]
            emitter: ChangeEmitter::new(),
        };

        if bootstrap != Bootstrap::Loaded {
            store.commit()?;
        }

        info!(
            "event=store_bootstrap collection={} status={} records={}",
            R::COLLECTION,
            bootstrap.as_str(),
            store.items.len()
        );
        Ok(store)
    }

    /// Write the full collection to the backend, replacing what was there.
    pub fn commit(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.items).map_err(|e| StoreError::Serde {
            collection: R::COLLECTION.to_string(),
            message: e.to_string(),
        })?;
        self.backend.write(R::COLLECTION, &json)?;
        debug!(
            "event=store_commit collection={} records={} bytes={}",
            R::COLLECTION,
            self.items.len(),
            json.len()
        );
        Ok(())
    }

    /// Drop the in-memory collection and replace the stored one with the
    /// seed set the store was opened with. Pending delete confirmations are
    /// cancelled.
    pub fn reseed(&mut self) -> Result<(), StoreError> {
        let previous = std::mem::replace(&mut self.items, self.seed.clone());
        if let Err(err) = self.commit() {
            self.items = previous;
            return Err(err);
        }
        self.pending_deletes.clear();
        info!(
            "event=store_reseed collection={} records={}",
            R::COLLECTION,
            self.items.len()
        );
        Ok(())
    }

    /// How the collection was obtained when the store opened.
    pub fn bootstrap(&self) -> Bootstrap {
        self.bootstrap
    }

    /// The full collection in insertion order.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Delete the stored collection and hand the backend back. The next open
    /// on the same backend starts from the seed set again.
    pub fn reset(self) -> Result<B, StoreError> {
        let existed = self.backend.remove(R::COLLECTION)?;
        info!(
            "event=store_reset collection={} existed={}",
            R::COLLECTION,
            existed
        );
        Ok(self.backend)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The domain's category vocabulary, wildcard first.
    pub fn categories(&self) -> &'static [&'static str] {
        R::CATEGORIES
    }

    /// Select a category. The wildcard and the empty string select all.
    pub fn set_category(&mut self, category: impl Into<String>) -> Result<(), StoreError> {
        let category = category.into();
        if !is_known_category::<R>(&category) {
            return Err(unknown_category::<R>(category));
        }
        self.filter.set_category(category);
        Ok(())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.set_search(search);
    }

    /// Records passing the current filter, in collection order.
    pub fn visible(&self) -> View<'_, R> {
        self.filter.apply(&self.items)
    }

    /// Derived values over the whole collection.
    pub fn aggregate<A: Aggregate<R>>(&self) -> A {
        A::compute(&self.items)
    }

    /// Derived values over the records passing the current filter.
    pub fn aggregate_visible<A: Aggregate<R>>(&self) -> A {
        A::compute(self.visible().iter())
    }

    /// Register a listener for committed changes. The listener receives the
    /// affected record as JSON.
    #[cfg(feature = "emitter")]
    pub fn on<F>(&mut self, kind: ChangeKind, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(kind, listener);
    }

    /// Number of delete confirmations awaiting an answer.
    pub fn pending_delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    pub(super) fn position(&self, id: RecordId) -> Option<usize> {
        self.items.iter().position(|r| r.id() == id)
    }

    pub(super) fn pending_token_for(&self, id: RecordId) -> Option<DeleteToken> {
        self.pending_deletes
            .iter()
            .find(|(_, pending)| **pending == id)
            .map(|(token, _)| DeleteToken(*token))
    }

    pub(super) fn issue_token(&mut self, id: RecordId) -> DeleteToken {
        let token = self.next_token;
        self.next_token += 1;
        self.pending_deletes.insert(token, id);
        DeleteToken(token)
    }
}

fn decode<R: Record>(raw: &str) -> Result<Vec<R>, String> {
    let items: Vec<R> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let mut seen = HashSet::with_capacity(items.len());
    for record in &items {
        if !seen.insert(record.id()) {
            return Err(format!("duplicate id {}", record.id()));
        }
    }
    Ok(items)
}

/// Copy a corrupt payload to the first free `<key>.corrupt[.N]` key, so
/// earlier backups survive a later corruption. Returns the key used.
fn backup_corrupt<R: Record, B: StorageBackend>(
    backend: &B,
    raw: &str,
) -> Result<String, StoreError> {
    let base = format!("{}.corrupt", R::COLLECTION);
    let mut key = base.clone();
    let mut suffix = 1u32;
    while backend.read(&key)?.is_some() {
        key = format!("{}.{}", base, suffix);
        suffix += 1;
    }
    backend.write(&key, raw)?;
    Ok(key)
}

fn unknown_category<R: Record>(category: String) -> StoreError {
    StoreError::UnknownCategory {
        collection: R::COLLECTION.to_string(),
        category,
    }
}
