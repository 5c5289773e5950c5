//! Inventory: stocked items with a reorder threshold.
//!
//! An item is low on stock when `quantity <= minStock`. The flag is computed
//! from the two fields every time it is read, so a quantity adjustment is
//! reflected immediately.

use serde::{Deserialize, Serialize};

use crate::aggregate::{count_where, sum_by, Aggregate};
use crate::{Record, RecordId, Seeded, Stocked};

pub const CATEGORIES: &[&str] = &["全部", "电子产品", "服装", "食品", "其他"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-inventory-data", categories = CATEGORIES)]
pub struct InventoryItem {
    pub id: RecordId,
    #[record(search)]
    pub name: String,
    #[record(search)]
    pub sku: String,
    pub quantity: u32,
    pub min_stock: u32,
    /// Unit price.
    pub price: f64,
    pub category: String,
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        quantity: u32,
        min_stock: u32,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            sku: sku.into(),
            quantity,
            min_stock,
            price,
            category: category.into(),
        }
    }

    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl Stocked for InventoryItem {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    fn min_stock(&self) -> u32 {
        self.min_stock
    }
}

impl Seeded for InventoryItem {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("无线鼠标", "EL-1001", 25, 10, 89.0, "电子产品"),
            ("USB-C 数据线", "EL-1002", 4, 15, 29.9, "电子产品"),
            ("纯棉T恤", "CL-2001", 40, 20, 59.0, "服装"),
            ("挂耳咖啡", "FD-3001", 8, 12, 3.5, "食品"),
            ("收纳箱", "OT-4001", 12, 5, 45.0, "其他"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((name, sku, quantity, min_stock, price, category), id)| InventoryItem {
                id,
                ..InventoryItem::new(name, sku, quantity, min_stock, price, category)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StockSummary {
    pub items: usize,
    pub low_stock: usize,
    pub total_value: f64,
}

impl Aggregate<InventoryItem> for StockSummary {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        let items: Vec<&InventoryItem> = items.into_iter().collect();
        StockSummary {
            items: items.len(),
            low_stock: count_where(items.iter().copied(), |item| item.is_low_stock()),
            total_value: sum_by(items.iter().copied(), InventoryItem::stock_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryStorage, StorageExt};

    #[test]
    fn low_stock_flips_after_restock() {
        let mut store = InMemoryStorage::new().collection::<InventoryItem>().unwrap();
        let id = store
            .add(InventoryItem::new("充电宝", "EL-1003", 3, 5, 99.0, "电子产品"))
            .unwrap();
        assert!(store.get(id).unwrap().is_low_stock());

        assert_eq!(store.adjust_quantity(id, 3).unwrap(), Some(6));
        assert!(!store.get(id).unwrap().is_low_stock());
    }

    #[test]
    fn quantity_floors_at_zero() {
        let mut store = InMemoryStorage::new().collection::<InventoryItem>().unwrap();
        assert_eq!(store.adjust_quantity(4, -100).unwrap(), Some(0));
        assert_eq!(store.get(4).unwrap().quantity, 0);
    }

    #[test]
    fn extreme_deltas_saturate() {
        let mut store = InMemoryStorage::new().collection::<InventoryItem>().unwrap();
        assert_eq!(store.adjust_quantity(1, i64::MAX).unwrap(), Some(u32::MAX));
        assert_eq!(store.adjust_quantity(1, i64::MAX).unwrap(), Some(u32::MAX));
        assert_eq!(store.adjust_quantity(1, i64::MIN).unwrap(), Some(0));
        assert_eq!(store.get(1).unwrap().quantity, 0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let item = InventoryItem::new("x", "X-1", 5, 5, 1.0, "其他");
        assert!(item.is_low_stock());
    }

    #[test]
    fn summary_over_seed() {
        let summary = StockSummary::compute(&InventoryItem::defaults());
        assert_eq!(summary.items, 5);
        assert_eq!(summary.low_stock, 2);
        let expected = 25.0 * 89.0 + 4.0 * 29.9 + 40.0 * 59.0 + 8.0 * 3.5 + 12.0 * 45.0;
        assert!((summary.total_value - expected).abs() < 1e-9);
    }
}
