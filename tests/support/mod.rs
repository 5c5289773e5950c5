//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use record_shelf::{InMemoryStorage, Record, RecordId, StorageBackend, StorageError};
use serde::{Deserialize, Serialize};

pub const TASK_CATEGORIES: &[&str] = &["全部", "工作", "个人"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-tasks-data", categories = TASK_CATEGORIES)]
pub struct Task {
    pub id: RecordId,
    #[record(search)]
    pub title: String,
    pub done: bool,
    pub category: String,
}

pub fn task(title: &str, category: &str) -> Task {
    Task {
        id: 0,
        title: title.to_string(),
        done: false,
        category: category.to_string(),
    }
}

/// In-memory storage that counts writes and can be told to fail them.
#[derive(Clone, Default)]
pub struct FlakyStorage {
    inner: InMemoryStorage,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryStorage {
        &self.inner
    }
}

impl StorageBackend for FlakyStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                key: key.to_string(),
                message: "disk full".to_string(),
            });
        }
        self.inner.write(key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.remove(key)
    }
}

/// Decode what the backend currently holds for `R`.
pub fn persisted<R: Record, B: StorageBackend>(backend: &B) -> Vec<R> {
    let raw = backend
        .read(R::COLLECTION)
        .unwrap()
        .expect("collection was never written");
    serde_json::from_str(&raw).unwrap()
}

pub fn ids<'a, R: Record + 'a>(items: impl IntoIterator<Item = &'a R>) -> Vec<RecordId> {
    items.into_iter().map(Record::id).collect()
}

/// Poll `check` until it holds or five seconds pass. Change listeners run on
/// their own threads, so tests wait on the outcome instead of sleeping.
pub fn eventually(mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if check() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(5));
    }
}
