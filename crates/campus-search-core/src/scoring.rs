//! Additive field-weight scoring.
//!
//! Title-like fields earn one of three tiers (exact, prefix, contains);
//! every other matching field earns a flat amount. Tiers add up across
//! fields, so an item matching in its title and its body outranks one
//! matching in either alone.
//!
//! ```text
//! primary field:  exact → title_exact   prefix → title_prefix   contains → title_contains
//! other field:    contains → field_contains
//! static page:    title → page_title    else description → page_description
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::matcher::{contains_folded, field_matches};
use crate::models::StaticPage;
use crate::source::{FieldText, SearchField};

/// Score weights. Defaults bias ranking toward title matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub title_exact: u32,
    pub title_prefix: u32,
    pub title_contains: u32,
    pub field_contains: u32,
    pub page_title: u32,
    pub page_description: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            title_exact: 100,
            title_prefix: 50,
            title_contains: 25,
            field_contains: 10,
            page_title: 50,
            page_description: 10,
        }
    }
}

impl ScoreWeights {
    fn title_tier(&self, text: &str, folded_query: &str) -> u32 {
        let folded = text.to_lowercase();
        if folded == folded_query {
            self.title_exact
        } else if folded.starts_with(folded_query) {
            self.title_prefix
        } else if folded.contains(folded_query) {
            self.title_contains
        } else {
            0
        }
    }
}

/// Score an item against the same field list used to match it. The sum
/// saturates at `u32::MAX` for extreme configured weights.
pub fn score_item(
    item: &Value,
    fields: &[SearchField],
    folded_query: &str,
    weights: &ScoreWeights,
) -> u32 {
    fields
        .iter()
        .filter_map(|field| field.path.text(item).map(|text| (field, text)))
        .map(|(field, text)| {
            if field.primary {
                match &text {
                    FieldText::Scalar(s) => weights.title_tier(s, folded_query),
                    FieldText::List(items) => items
                        .iter()
                        .map(|s| weights.title_tier(s, folded_query))
                        .max()
                        .unwrap_or(0),
                }
            } else if field_matches(&text, folded_query) {
                weights.field_contains
            } else {
                0
            }
        })
        .fold(0u32, u32::saturating_add)
}

/// Two-tier page score. Returns 0 for a page that does not match.
pub fn score_page(page: &StaticPage, folded_query: &str, weights: &ScoreWeights) -> u32 {
    if contains_folded(page.title, folded_query) {
        weights.page_title
    } else if contains_folded(page.description, folded_query) {
        weights.page_description
    } else {
        0
    }
}
