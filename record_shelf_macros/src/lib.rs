mod record;

use proc_macro::TokenStream;

/// Derive macro implementing `record_shelf::Record` for a plain struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "u-contacts-data", categories = CONTACT_CATEGORIES)]
/// struct Contact {
///     #[record(id)]
///     id: RecordId,
///     #[record(search)]
///     name: String,
///     #[record(search)]
///     phone: String,
///     #[record(category)]
///     category: String,
/// }
/// ```
///
/// - `collection` is the persistence key. Defaults to the snake_case struct
///   name with an `s` suffix.
/// - `categories` is a `&'static [&'static str]` expression. Defaults to the
///   wildcard alone.
/// - `id` and `category` fall back to fields with those names.
/// - Every `search` field must implement `AsRef<str>`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
