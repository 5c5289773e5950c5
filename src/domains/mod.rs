//! Ready-made record types, one per app: each with its storage key,
//! category vocabulary, seed collection and summary aggregates.

pub mod bookmarks;
pub mod books;
pub mod budget;
pub mod calendar;
pub mod contacts;
pub mod files;
pub mod habits;
pub mod images;
pub mod inventory;
pub mod invoices;
