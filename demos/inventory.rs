//! Inventory walk-through on the file backend.
//!
//! ```text
//! RECORD_SHELF_DATA_DIR=/tmp/shelf RUST_LOG=debug cargo run --example inventory
//! ```

use std::error::Error;

use flexi_logger::Logger;
use log::info;
use record_shelf::domains::inventory::{InventoryItem, StockSummary};
use record_shelf::{FileStorage, Patch, Stocked, StorageConfig, StorageExt};

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()?;

    let config = StorageConfig::from_env();
    info!(
        "event=demo_start module=inventory data_dir={}",
        config.data_dir.display()
    );
    let storage = FileStorage::open(config)?;
    let mut store = storage.collection::<InventoryItem>()?;

    print_summary("opened", &store.aggregate());

    let id = store.add(InventoryItem::new(
        "机械键盘",
        "EL-1010",
        3,
        5,
        399.0,
        "电子产品",
    ))?;
    println!("added #{id}, low stock: {}", low_stock(&store, id));

    store.adjust_quantity(id, 10)?;
    println!("restocked #{id}, low stock: {}", low_stock(&store, id));

    store.update(id, &Patch::new().set("price", 359.0))?;

    store.set_category("电子产品")?;
    store.set_search("键盘");
    for item in store.visible().iter() {
        println!(
            "  {:>3} {:<12} {:<8} qty={:<4} min={:<4} ¥{:.2}",
            item.id, item.name, item.sku, item.quantity, item.min_stock, item.price
        );
    }

    if let Some(token) = store.request_delete(id) {
        store.confirm_delete(token)?;
        println!("deleted #{id}");
    }

    print_summary("closing", &store.aggregate());
    Ok(())
}

fn low_stock<B: record_shelf::StorageBackend>(
    store: &record_shelf::EntityStore<InventoryItem, B>,
    id: u64,
) -> bool {
    store.get(id).map(Stocked::is_low_stock).unwrap_or(false)
}

fn print_summary(label: &str, summary: &StockSummary) {
    println!(
        "[{label}] items={} low_stock={} total_value=¥{:.2}",
        summary.items, summary.low_stock, summary.total_value
    );
}
