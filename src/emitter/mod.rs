//! Change notifications fired after a store write succeeds.
//!
//! Mutations queue a change while they run; the store emits the queue only
//! once the collection has been written. A failed write drops the queue, so
//! listeners never hear about changes that were rolled back.
//!
//! Listeners run on their own threads, one per listener per change, so a
//! listener may still be running when the mutation returns. Listeners for
//! the same change fire in no particular order.
//!
//! # Example
//!
//! ```ignore
//! use record_shelf::emitter::ChangeKind;
//!
//! store.on(ChangeKind::Added, |payload| {
//!     println!("added: {}", payload);
//! });
//! ```

use event_emitter_rs::EventEmitter;

/// The kinds of change a store reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
}

impl ChangeKind {
    /// Event name used on the underlying emitter.
    pub fn event_name(self) -> &'static str {
        match self {
            ChangeKind::Added => "RecordAdded",
            ChangeKind::Updated => "RecordUpdated",
            ChangeKind::Deleted => "RecordDeleted",
        }
    }
}

struct QueuedChange {
    kind: ChangeKind,
    payload: String,
}

/// Listener registry plus the changes waiting for a successful write.
///
/// Listeners receive the affected record serialized as JSON. For deletes the
/// payload is the record as it was before removal.
pub struct ChangeEmitter {
    event_emitter: EventEmitter,
    queued: Vec<QueuedChange>,
}

impl Default for ChangeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeEmitter {
    pub fn new() -> Self {
        Self {
            event_emitter: EventEmitter::new(),
            queued: Vec::new(),
        }
    }

    /// Register a listener for one kind of change.
    pub fn on<F>(&mut self, kind: ChangeKind, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.event_emitter.on(kind.event_name(), listener);
    }

    /// Queue a change to be emitted after the write.
    pub fn enqueue(&mut self, kind: ChangeKind, payload: impl Into<String>) {
        self.queued.push(QueuedChange {
            kind,
            payload: payload.into(),
        });
    }

    /// Emit all queued changes. Call this after a successful write.
    pub fn emit_queued(&mut self) {
        let queued: Vec<_> = self.queued.drain(..).collect();
        for change in queued {
            self.event_emitter
                .emit(change.kind.event_name(), change.payload);
        }
    }

    /// Forget queued changes whose write failed.
    pub fn discard_queued(&mut self) {
        self.queued.clear();
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }
}
