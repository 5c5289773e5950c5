use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, FieldsNamed, Ident, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let fields = named_fields(input)?;

    let (collection, categories) = extract_struct_attrs(input)?;
    let id_field = find_marked_field(fields, "id")?
        .or_else(|| find_named_field(fields, "id"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                name,
                "Record derive: no field marked with #[record(id)] and no field named `id`",
            )
        })?;
    let category_field = find_marked_field(fields, "category")?
        .or_else(|| find_named_field(fields, "category"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                name,
                "Record derive: no field marked with #[record(category)] and no field named `category`",
            )
        })?;
    let search_fields = find_search_fields(fields)?;

    let categories = match categories {
        Some(expr) => quote! { #expr },
        None => quote! { &[record_shelf::WILDCARD] },
    };

    Ok(quote! {
        impl record_shelf::Record for #name {
            const COLLECTION: &'static str = #collection;
            const CATEGORIES: &'static [&'static str] = #categories;

            fn id(&self) -> record_shelf::RecordId {
                self.#id_field
            }

            fn set_id(&mut self, id: record_shelf::RecordId) {
                self.#id_field = id;
            }

            fn category(&self) -> &str {
                ::core::convert::AsRef::<str>::as_ref(&self.#category_field)
            }

            fn search_fields(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![#(::core::convert::AsRef::<str>::as_ref(&self.#search_fields)),*]
            }
        }
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<&FieldsNamed> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields);
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "Record derive only supports structs with named fields",
    ))
}

// #[record(collection = "...", categories = PATH)] on the struct.
fn extract_struct_attrs(input: &DeriveInput) -> syn::Result<(String, Option<Expr>)> {
    let mut collection = None;
    let mut categories = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            } else if meta.path.is_ident("categories") {
                let value: Expr = meta.value()?.parse()?;
                categories = Some(value);
            } else {
                return Err(meta.error("expected `collection` or `categories`"));
            }
            Ok(())
        })?;
    }

    // Default: snake_case struct name + "s"
    let collection =
        collection.unwrap_or_else(|| format!("{}s", to_snake_case(&input.ident.to_string())));
    Ok((collection, categories))
}

fn field_has_marker(field: &syn::Field, marker: &str) -> syn::Result<bool> {
    let mut found = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(marker) {
                found = true;
            } else if !(meta.path.is_ident("id")
                || meta.path.is_ident("category")
                || meta.path.is_ident("search"))
            {
                return Err(meta.error("expected `id`, `category` or `search`"));
            }
            Ok(())
        })?;
    }
    Ok(found)
}

fn find_marked_field(fields: &FieldsNamed, marker: &str) -> syn::Result<Option<Ident>> {
    for field in &fields.named {
        if field_has_marker(field, marker)? {
            return Ok(field.ident.clone());
        }
    }
    Ok(None)
}

fn find_named_field(fields: &FieldsNamed, name: &str) -> Option<Ident> {
    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == name)
        .cloned()
}

fn find_search_fields(fields: &FieldsNamed) -> syn::Result<Vec<Ident>> {
    let mut found = Vec::new();
    for field in &fields.named {
        if field_has_marker(field, "search")? {
            found.extend(field.ident.clone());
        }
    }
    Ok(found)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
