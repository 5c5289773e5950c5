//! Invoices, categorised by payment state.

use serde::{Deserialize, Serialize};

use crate::aggregate::{sum_by, Aggregate};
use crate::{Record, RecordId, Seeded};

pub const PAID: &str = "已支付";
pub const PENDING: &str = "待支付";
pub const OVERDUE: &str = "已逾期";

pub const CATEGORIES: &[&str] = &["全部", PAID, PENDING, OVERDUE];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(collection = "u-invoices-data", categories = CATEGORIES)]
pub struct Invoice {
    pub id: RecordId,
    /// Invoice number, e.g. `INV-2024-001`.
    #[record(search)]
    pub number: String,
    #[record(search)]
    pub client: String,
    pub amount: f64,
    pub date: String,
    pub due_date: String,
    pub category: String,
}

impl Invoice {
    pub fn new(
        number: impl Into<String>,
        client: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
        due_date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            number: number.into(),
            client: client.into(),
            amount,
            date: date.into(),
            due_date: due_date.into(),
            category: category.into(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.category == PAID
    }
}

impl Seeded for Invoice {
    fn defaults() -> Vec<Self> {
        let seed = [
            ("INV-2024-001", "星辰科技", 12000.0, "2024-01-10", "2024-02-10", PAID),
            ("INV-2024-002", "蓝海贸易", 8600.0, "2024-02-01", "2024-03-01", OVERDUE),
            ("INV-2024-003", "青木设计", 4500.0, "2024-02-20", "2024-03-20", PENDING),
            ("INV-2024-004", "星辰科技", 15800.0, "2024-03-01", "2024-04-01", PENDING),
        ];
        seed.into_iter()
            .zip(1..)
            .map(|((number, client, amount, date, due_date, category), id)| Invoice {
                id,
                ..Invoice::new(number, client, amount, date, due_date, category)
            })
            .collect()
    }
}

/// Totals for a set of invoices. Usually computed over the visible subset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceTotals {
    pub count: usize,
    pub amount: f64,
    /// Amount not yet paid (pending plus overdue).
    pub outstanding: f64,
}

impl Aggregate<Invoice> for InvoiceTotals {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Invoice>,
    {
        let items: Vec<&Invoice> = items.into_iter().collect();
        InvoiceTotals {
            count: items.len(),
            amount: sum_by(items.iter().copied(), |inv| inv.amount),
            outstanding: sum_by(items.iter().copied(), |inv| {
                if inv.is_settled() {
                    0.0
                } else {
                    inv.amount
                }
            }),
        }
    }
}
