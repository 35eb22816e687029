//! Case-insensitive substring matching over configured fields.
//!
//! No tokenization, stemming, or fuzzy matching: an item matches when any
//! configured field contains the folded query.

use serde_json::Value;

use crate::models::StaticPage;
use crate::source::{FieldText, SearchField};

/// `true` when `text`, lowercased, contains `folded_query`.
pub fn contains_folded(text: &str, folded_query: &str) -> bool {
    text.to_lowercase().contains(folded_query)
}

/// `true` when the field text (or any element of a list) contains the query.
pub fn field_matches(text: &FieldText<'_>, folded_query: &str) -> bool {
    match text {
        FieldText::Scalar(s) => contains_folded(s, folded_query),
        FieldText::List(items) => items.iter().any(|s| contains_folded(s, folded_query)),
    }
}

/// OR across `fields`: one matching field is enough.
pub fn item_matches(item: &Value, fields: &[SearchField], folded_query: &str) -> bool {
    fields.iter().any(|field| {
        field
            .path
            .text(item)
            .is_some_and(|text| field_matches(&text, folded_query))
    })
}

pub fn page_matches(page: &StaticPage, folded_query: &str) -> bool {
    contains_folded(page.title, folded_query) || contains_folded(page.description, folded_query)
}
