//! Budget: income and expense entries.

use serde::{Deserialize, Serialize};

use crate::aggregate::{sum_by, Aggregate};
use crate::{Record, RecordId, Seeded};

pub const CATEGORIES: &[&str] = &["全部", "餐饮", "交通", "购物", "娱乐", "工资", "其他"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "ubudget-data", categories = CATEGORIES)]
pub struct BudgetEntry {
    pub id: RecordId,
    #[record(search)]
    pub description: String,
    /// Always positive; the direction comes from `kind`.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: EntryType,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub category: String,
}

impl BudgetEntry {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: EntryType,
        date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            description: description.into(),
            amount,
            kind,
            date: date.into(),
            category: category.into(),
        }
    }
}

impl Seeded for BudgetEntry {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("午餐", 35.0, EntryType::Expense, "2024-03-01", "餐饮"),
            ("地铁月票", 120.0, EntryType::Expense, "2024-03-01", "交通"),
            ("三月工资", 8500.0, EntryType::Income, "2024-03-05", "工资"),
            ("电影票", 60.0, EntryType::Expense, "2024-03-08", "娱乐"),
            ("超市采购", 210.5, EntryType::Expense, "2024-03-09", "购物"),
            ("晚餐聚会", 180.0, EntryType::Expense, "2024-03-10", "餐饮"),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((description, amount, kind, date, category), id)| BudgetEntry {
                id,
                ..BudgetEntry::new(description, amount, kind, date, category)
            })
            .collect()
    }

    fn initial_category() -> &'static str {
        "餐饮"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balance {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl Aggregate<BudgetEntry> for Balance {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a BudgetEntry>,
    {
        let items: Vec<&BudgetEntry> = items.into_iter().collect();
        let income = sum_by(items.iter().copied(), |e| match e.kind {
            EntryType::Income => e.amount,
            EntryType::Expense => 0.0,
        });
        let expense = sum_by(items.iter().copied(), |e| match e.kind {
            EntryType::Expense => e.amount,
            EntryType::Income => 0.0,
        });
        Balance {
            income,
            expense,
            balance: income - expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryStorage, StorageExt};

    #[test]
    fn opens_on_the_food_category() {
        let store = InMemoryStorage::new().collection::<BudgetEntry>().unwrap();
        assert_eq!(store.filter().category(), "餐饮");
        assert!(store.visible().iter().all(|e| e.category == "餐饮"));
        assert_eq!(store.visible().len(), 2);
    }

    #[test]
    fn type_field_keeps_its_wire_name() {
        let entry = BudgetEntry::new("奖金", 500.0, EntryType::Income, "2024-04-01", "工资");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "income");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let entries = vec![
            BudgetEntry::new("工资", 1000.0, EntryType::Income, "2024-04-01", "工资"),
            BudgetEntry::new("午餐", 40.0, EntryType::Expense, "2024-04-01", "餐饮"),
            BudgetEntry::new("打车", 60.0, EntryType::Expense, "2024-04-02", "交通"),
        ];
        let totals = Balance::compute(&entries);
        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expense, 100.0);
        assert_eq!(totals.balance, 900.0);
    }
}
