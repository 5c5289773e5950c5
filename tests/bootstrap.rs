mod support;

use record_shelf::domains::bookmarks::Bookmark;
use record_shelf::domains::habits::Habit;
use record_shelf::{
    Bootstrap, CorruptionPolicy, EntityStore, FileStorage, InMemoryStorage, Record, Seeded,
    StorageBackend, StorageConfig, StorageExt, StoreError, StoreOptions,
};
use support::{persisted, task, Task};

#[test]
fn absent_key_seeds_and_writes() {
    let storage = InMemoryStorage::new();
    let store = (&storage).collection::<Bookmark>().unwrap();

    assert_eq!(store.bootstrap(), Bootstrap::Seeded);
    assert_eq!(store.items(), Bookmark::defaults().as_slice());
    assert_eq!(persisted::<Bookmark, _>(&storage), Bookmark::defaults());
}

#[test]
fn stored_collection_is_loaded_as_is() {
    let storage = InMemoryStorage::new();
    {
        let mut store = (&storage).collection::<Habit>().unwrap();
        store.delete(1).unwrap();
    }

    let reopened = (&storage).collection::<Habit>().unwrap();
    assert_eq!(reopened.bootstrap(), Bootstrap::Loaded);
    assert!(reopened.get(1).is_none());
    assert_eq!(reopened.len(), Habit::defaults().len() - 1);
}

#[test]
fn corrupt_data_is_backed_up_then_reseeded() {
    let storage = InMemoryStorage::new();
    storage.write(Habit::COLLECTION, "{not json").unwrap();

    let store = (&storage).collection::<Habit>().unwrap();
    assert_eq!(store.bootstrap(), Bootstrap::Reseeded);
    assert_eq!(store.items(), Habit::defaults().as_slice());

    let backup = storage.read("u-habits-data.corrupt").unwrap();
    assert_eq!(backup.as_deref(), Some("{not json"));
    assert_eq!(persisted::<Habit, _>(&storage), Habit::defaults());
}

#[test]
fn wrong_shape_counts_as_corrupt() {
    let storage = InMemoryStorage::new();
    storage
        .write(Habit::COLLECTION, r#"[{"id":1,"name":"跑步"}]"#)
        .unwrap();

    let options = StoreOptions::new().with_corruption_policy(CorruptionPolicy::Fail);
    let result = EntityStore::<Habit, _>::open_with(&storage, options);
    assert!(matches!(result, Err(StoreError::Corrupted { .. })));

    // Nothing was overwritten.
    assert_eq!(
        storage.read(Habit::COLLECTION).unwrap().as_deref(),
        Some(r#"[{"id":1,"name":"跑步"}]"#)
    );
}

#[test]
fn seed_override_replaces_defaults() {
    let storage = InMemoryStorage::new();
    let options = StoreOptions::new().with_seed(vec![Task {
        id: 1,
        ..task("seeded", "个人")
    }]);
    let store = EntityStore::<Task, _>::open_with(&storage, options).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.next_id(), 2);
}

#[test]
fn reset_then_reopen_starts_from_seed() {
    let storage = InMemoryStorage::new();
    let mut store = (&storage).collection::<Bookmark>().unwrap();
    store.delete(1).unwrap();
    store.reset().unwrap();

    let reopened = (&storage).collection::<Bookmark>().unwrap();
    assert_eq!(reopened.bootstrap(), Bootstrap::Seeded);
    assert_eq!(reopened.len(), Bookmark::defaults().len());
}

#[test]
fn reseed_restores_defaults() {
    let storage = InMemoryStorage::new();
    let mut store = (&storage).collection::<Bookmark>().unwrap();
    store.delete(1).unwrap();
    store.delete(2).unwrap();

    store.reseed().unwrap();
    assert_eq!(store.items(), Bookmark::defaults().as_slice());
    assert_eq!(persisted::<Bookmark, _>(&storage), Bookmark::defaults());
}

#[test]
fn file_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let storage = FileStorage::open(StorageConfig::new(dir.path())).unwrap();
        let mut store = storage.collection::<Habit>().unwrap();
        store.add(Habit::new("拉伸", "睡前 10 分钟", "健康")).unwrap()
    };

    let storage = FileStorage::open(StorageConfig::new(dir.path())).unwrap();
    let store = storage.collection::<Habit>().unwrap();
    assert_eq!(store.bootstrap(), Bootstrap::Loaded);
    assert_eq!(store.get(id).unwrap().name, "拉伸");
    assert!(dir.path().join("u-habits-data.json").exists());
}
