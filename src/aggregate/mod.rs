//! Aggregates - values derived from a collection on demand.
//!
//! Nothing here is stored; a summary is recomputed from the records every
//! time it is asked for, so it always agrees with the collection.

use crate::record::{Record, WILDCARD};

/// A summary computed from a sequence of records.
pub trait Aggregate<R>: Sized {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a;
}

/// Number of records in the sequence.
impl<R> Aggregate<R> for usize {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        items.into_iter().count()
    }
}

pub fn count_where<'a, R: 'a>(
    items: impl IntoIterator<Item = &'a R>,
    predicate: impl Fn(&R) -> bool,
) -> usize {
    items.into_iter().filter(|r| predicate(r)).count()
}

pub fn sum_by<'a, R: 'a>(items: impl IntoIterator<Item = &'a R>, value: impl Fn(&R) -> f64) -> f64 {
    items.into_iter().map(value).sum()
}

/// Record count per category, in vocabulary order. The wildcard is skipped
/// and categories without records report zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts(pub Vec<(&'static str, usize)>);

impl CategoryCounts {
    pub fn get(&self, category: &str) -> usize {
        self.0
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl<R: Record> Aggregate<R> for CategoryCounts {
    fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        let mut counts: Vec<(&'static str, usize)> = R::CATEGORIES
            .iter()
            .filter(|c| **c != WILDCARD)
            .map(|c| (*c, 0))
            .collect();
        for record in items {
            if let Some(slot) = counts.iter_mut().find(|(c, _)| *c == record.category()) {
                slot.1 += 1;
            }
        }
        CategoryCounts(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordId;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Serialize, Deserialize)]
    struct Entry {
        id: RecordId,
        amount: f64,
        category: String,
    }

    impl Record for Entry {
        const COLLECTION: &'static str = "entries";
        const CATEGORIES: &'static [&'static str] = &["全部", "餐饮", "交通", "其他"];

        fn id(&self) -> RecordId {
            self.id
        }

        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }

        fn category(&self) -> &str {
            &self.category
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![]
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { id: 1, amount: 12.5, category: "餐饮".into() },
            Entry { id: 2, amount: 4.0, category: "交通".into() },
            Entry { id: 3, amount: 30.0, category: "餐饮".into() },
        ]
    }

    #[test]
    fn category_counts_follow_vocabulary_order() {
        let counts: CategoryCounts = Aggregate::compute(&entries());
        assert_eq!(counts.0, vec![("餐饮", 2), ("交通", 1), ("其他", 0)]);
        assert_eq!(counts.get("交通"), 1);
        assert_eq!(counts.get("全部"), 0);
    }

    #[test]
    fn helpers_over_empty_input() {
        let none: Vec<Entry> = Vec::new();
        assert_eq!(count_where(&none, |_| true), 0);
        assert_eq!(sum_by(&none, |e| e.amount), 0.0);
        assert_eq!(<usize as Aggregate<Entry>>::compute(&none), 0);
    }

    #[test]
    fn sum_and_count() {
        let items = entries();
        assert_eq!(sum_by(&items, |e| e.amount), 46.5);
        assert_eq!(count_where(&items, |e| e.category == "餐饮"), 2);
    }
}
