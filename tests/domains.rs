mod support;

use record_shelf::domains::bookmarks::Bookmark;
use record_shelf::domains::habits::{Habit, HabitSummary, COMPLETED_TODAY};
use record_shelf::domains::inventory::{InventoryItem, StockSummary};
use record_shelf::{InMemoryStorage, Seeded, Stocked, StorageExt, WILDCARD};
use support::ids;

#[test]
fn restocking_clears_low_stock_warning() {
    let mut store = InMemoryStorage::new().collection::<InventoryItem>().unwrap();
    let id = store
        .add(InventoryItem::new("键盘", "EL-1010", 3, 5, 199.0, "电子产品"))
        .unwrap();
    let before: StockSummary = store.aggregate();
    assert!(store.get(id).unwrap().is_low_stock());

    assert_eq!(store.adjust_quantity(id, 3).unwrap(), Some(6));

    assert!(!store.get(id).unwrap().is_low_stock());
    let after: StockSummary = store.aggregate();
    assert_eq!(after.low_stock, before.low_stock - 1);
    assert!((after.total_value - before.total_value - 3.0 * 199.0).abs() < 1e-9);
}

#[test]
fn adjust_on_missing_item_is_noop() {
    let mut store = InMemoryStorage::new().collection::<InventoryItem>().unwrap();
    assert_eq!(store.adjust_quantity(404, 1).unwrap(), None);
}

#[test]
fn habit_streak_follows_completion() {
    let mut store = InMemoryStorage::new().collection::<Habit>().unwrap();
    let id = store
        .add(Habit {
            streak: 2,
            ..Habit::new("阅读", "每天 20 页", "学习")
        })
        .unwrap();

    assert_eq!(store.toggle(id, COMPLETED_TODAY).unwrap(), Some(true));
    let habit = store.get(id).unwrap();
    assert!(habit.completed_today);
    assert_eq!(habit.streak, 3);

    assert_eq!(store.toggle(id, COMPLETED_TODAY).unwrap(), Some(false));
    let habit = store.get(id).unwrap();
    assert!(!habit.completed_today);
    assert_eq!(habit.streak, 2);

    let summary: HabitSummary = store.aggregate();
    assert_eq!(summary.total, Habit::defaults().len() + 1);
}

#[test]
fn wildcard_shows_whole_collection() {
    let store = InMemoryStorage::new().collection::<Bookmark>().unwrap();
    assert_eq!(store.filter().category(), WILDCARD);
    assert_eq!(ids(store.visible().iter()), ids(store.items()));
}

#[test]
fn category_and_search_narrow_together() {
    let mut store = InMemoryStorage::new().collection::<Bookmark>().unwrap();
    store.set_category("工作").unwrap();
    store.set_search("team");

    let visible = store.visible();
    assert_eq!(ids(visible.iter()), vec![1, 3]);
    assert!(visible.iter().all(|b| b.category == "工作"));

    store.set_search("nothing like this");
    assert!(store.visible().is_empty());

    store.set_category(WILDCARD).unwrap();
    store.set_search("");
    assert_eq!(store.visible().len(), store.len());
}
