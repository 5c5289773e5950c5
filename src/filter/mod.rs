//! Filter engine - the visible subset of a collection.
//!
//! A record is visible when its category matches the selected category (or
//! the wildcard is selected) and, for a non-empty search string, one of its
//! search fields contains the search string ignoring case. Filtering never
//! reorders.

use crate::record::{Record, WILDCARD};

/// Category selector plus free-text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    category: String,
    search: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            category: WILDCARD.to_string(),
            search: String::new(),
        }
    }
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub(crate) fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub(crate) fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// An empty category selects everything, same as the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.category.is_empty() || self.category == WILDCARD
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        if !self.is_wildcard() && record.category() != self.category {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a, R: Record>(&self, items: &'a [R]) -> View<'a, R> {
        View {
            items: items.iter().filter(|r| self.matches(*r)).collect(),
        }
    }
}

/// The records passing a filter, in collection order.
#[derive(Debug)]
pub struct View<'a, R> {
    items: Vec<&'a R>,
}

impl<'a, R> View<'a, R> {
    pub fn items(&self) -> &[&'a R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Nothing matched; presentation shows its empty-state indicator.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.items.iter().copied()
    }

    pub fn into_vec(self) -> Vec<&'a R> {
        self.items
    }
}
