//! Mutations - every successful one ends with a full-collection write.
//!
//! Ids come from `max(existing) + 1`, recomputed on each add, so deleting the
//! highest record frees its id for the next add. Operations on an id that is
//! not present are no-ops that report `false`/`None` and write nothing.

use log::{debug, warn};

use super::{EntityStore, StoreError};
#[cfg(feature = "emitter")]
use crate::emitter::ChangeKind;
use crate::record::{apply_patch, flip_bool, Patch, Record, RecordId, Stocked};
use crate::storage::StorageBackend;

/// Handle for a delete awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeleteToken(pub(super) u64);

impl DeleteToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl<R: Record, B: StorageBackend> EntityStore<R, B> {
    /// The id the next `add` will assign.
    pub fn next_id(&self) -> RecordId {
        self.items.iter().map(Record::id).max().unwrap_or(0) + 1
    }

    /// Append `record` with a fresh id and persist. Any id already on the
    /// record is overwritten.
    pub fn add(&mut self, mut record: R) -> Result<RecordId, StoreError> {
        let id = self.next_id();
        record.set_id(id);
        #[cfg(feature = "emitter")]
        self.queue_change(ChangeKind::Added, &record);
        self.items.push(record);
        self.commit_or_rollback(|items| {
            items.pop();
        })?;
        debug!(
            "event=record_added collection={} id={} records={}",
            R::COLLECTION,
            id,
            self.items.len()
        );
        Ok(id)
    }

    /// Merge `patch` into the record with `id`. Patch values win; the id is
    /// never changed. Returns false when no record has `id`.
    pub fn update(&mut self, id: RecordId, patch: &Patch) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(self.missing("update", id));
        };
        let merged = apply_patch(&self.items[index], patch)?;
        self.replace(index, merged)?;
        debug!(
            "event=record_updated collection={} id={} fields={}",
            R::COLLECTION,
            id,
            patch.len()
        );
        Ok(true)
    }

    /// Remove the record with `id`. Deleting a missing id is a no-op that
    /// returns false, so a repeated delete is harmless.
    pub fn delete(&mut self, id: RecordId) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(self.missing("delete", id));
        };
        let removed = self.items.remove(index);
        #[cfg(feature = "emitter")]
        self.queue_change(ChangeKind::Deleted, &removed);
        self.commit_or_rollback(move |items| items.insert(index, removed))?;
        self.pending_deletes.retain(|_, pending| *pending != id);
        debug!(
            "event=record_deleted collection={} id={} records={}",
            R::COLLECTION,
            id,
            self.items.len()
        );
        Ok(true)
    }

    /// Flip the boolean `field` (wire name) of the record with `id`, running
    /// the record's toggle hook. Returns the new value, or None when no
    /// record has `id`.
    pub fn toggle(&mut self, id: RecordId, field: &str) -> Result<Option<bool>, StoreError> {
        let Some(index) = self.position(id) else {
            self.missing("toggle", id);
            return Ok(None);
        };
        let (flipped, now) = flip_bool(&self.items[index], field)?;
        self.replace(index, flipped)?;
        debug!(
            "event=record_toggled collection={} id={} field={} value={}",
            R::COLLECTION,
            id,
            field,
            now
        );
        Ok(Some(now))
    }

    /// Ask for a delete to be confirmed. Returns None when no record has
    /// `id`. Nothing is removed until `confirm_delete`. Asking again for the
    /// same id returns the token already issued for it.
    pub fn request_delete(&mut self, id: RecordId) -> Option<DeleteToken> {
        self.position(id)?;
        let token = match self.pending_token_for(id) {
            Some(token) => token,
            None => self.issue_token(id),
        };
        debug!(
            "event=delete_requested collection={} id={} token={}",
            R::COLLECTION,
            id,
            token.0
        );
        Some(token)
    }

    /// Carry out a requested delete. Returns false when the record went away
    /// in the meantime.
    pub fn confirm_delete(&mut self, token: DeleteToken) -> Result<bool, StoreError> {
        let id = self
            .pending_deletes
            .remove(&token.0)
            .ok_or(StoreError::UnknownDeleteToken(token.0))?;
        match self.delete(id) {
            Err(err) => {
                self.pending_deletes.insert(token.0, id);
                Err(err)
            }
            done => done,
        }
    }

    /// Drop a requested delete. Returns false for unknown tokens.
    pub fn cancel_delete(&mut self, token: DeleteToken) -> bool {
        self.pending_deletes.remove(&token.0).is_some()
    }

    fn replace(&mut self, index: usize, record: R) -> Result<(), StoreError> {
        #[cfg(feature = "emitter")]
        self.queue_change(ChangeKind::Updated, &record);
        let previous = std::mem::replace(&mut self.items[index], record);
        self.commit_or_rollback(move |items| items[index] = previous)
    }

    fn commit_or_rollback<F>(&mut self, rollback: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<R>),
    {
        match self.commit() {
            Ok(()) => {
                #[cfg(feature = "emitter")]
                self.emitter.emit_queued();
                Ok(())
            }
            Err(err) => {
                rollback(&mut self.items);
                #[cfg(feature = "emitter")]
                self.emitter.discard_queued();
                warn!(
                    "event=store_commit collection={} status=rolled_back error={}",
                    R::COLLECTION,
                    err
                );
                Err(err)
            }
        }
    }

    fn missing(&self, operation: &str, id: RecordId) -> bool {
        debug!(
            "event=record_{} collection={} id={} status=missing",
            operation,
            R::COLLECTION,
            id
        );
        false
    }

    #[cfg(feature = "emitter")]
    fn queue_change(&mut self, kind: ChangeKind, record: &R) {
        match serde_json::to_string(record) {
            Ok(payload) => self.emitter.enqueue(kind, payload),
            Err(e) => warn!(
                "event=change_queue collection={} kind={} error={}",
                R::COLLECTION,
                kind.event_name(),
                e
            ),
        }
    }
}

impl<R: Stocked, B: StorageBackend> EntityStore<R, B> {
    /// Change the stock quantity of the record with `id` by `delta`,
    /// flooring at zero and saturating at `u32::MAX`. Returns the new
    /// quantity, or None when no record has `id`.
    pub fn adjust_quantity(&mut self, id: RecordId, delta: i64) -> Result<Option<u32>, StoreError> {
        let Some(index) = self.position(id) else {
            self.missing("adjust", id);
            return Ok(None);
        };
        let mut adjusted = self.items[index].clone();
        let quantity = i64::from(adjusted.quantity())
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX)) as u32;
        adjusted.set_quantity(quantity);
        self.replace(index, adjusted)?;
        debug!(
            "event=quantity_adjusted collection={} id={} delta={} quantity={}",
            R::COLLECTION,
            id,
            delta,
            quantity
        );
        Ok(Some(quantity))
    }
}
