//! Per-source scanning and the final merge.
//!
//! [`scan_source`] and [`scan_pages`] turn fetched items into scored
//! [`SearchResult`]s. [`merge_ranked`] concatenates them (pages first, then
//! sources in registry order), stable-sorts by score, and truncates.

use serde_json::Value;

use crate::matcher::{item_matches, page_matches};
use crate::models::{truncate_description, ResultKind, SearchResult, StaticPage};
use crate::scoring::{score_item, score_page, ScoreWeights};
use crate::source::SearchSource;

/// Shared per-request scan parameters.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
    pub folded_query: &'a str,
    pub weights: &'a ScoreWeights,
    pub description_max_chars: usize,
}

/// Match and score every item fetched from `source`, in fetch order.
pub fn scan_source(source: &SearchSource, items: &[Value], opts: &ScanOptions<'_>) -> Vec<SearchResult> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item_matches(item, &source.fields, opts.folded_query))
        .map(|(position, item)| SearchResult {
            title: source
                .title_field
                .display(item)
                .unwrap_or_else(|| "Untitled".to_string()),
            description: truncate_description(
                &source.description_field.display(item).unwrap_or_default(),
                opts.description_max_chars,
            ),
            path: source.item_path(item, position),
            kind: source.kind,
            icon: source.icon.to_string(),
            score: score_item(item, &source.fields, opts.folded_query, opts.weights),
        })
        .collect()
}

pub fn scan_pages(pages: &[StaticPage], opts: &ScanOptions<'_>) -> Vec<SearchResult> {
    pages
        .iter()
        .filter(|page| page_matches(page, opts.folded_query))
        .map(|page| SearchResult {
            title: page.title.to_string(),
            description: truncate_description(page.description, opts.description_max_chars),
            path: page.path.to_string(),
            kind: ResultKind::Page,
            icon: page.icon.to_string(),
            score: score_page(page, opts.folded_query, opts.weights),
        })
        .collect()
}

/// Final ranked list plus the match count before truncation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranked {
    pub results: Vec<SearchResult>,
    pub total: usize,
}

/// Concatenate result groups in the given order, sort by score descending
/// (ties keep encounter order), and keep the first `limit`.
pub fn merge_ranked<I>(groups: I, limit: usize) -> Ranked
where
    I: IntoIterator<Item = Vec<SearchResult>>,
{
    let mut results: Vec<SearchResult> = groups.into_iter().flatten().collect();
    let total = results.len();

    // `sort_by` is stable, which keeps page-then-registry order among ties
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);

    Ranked { results, total }
}
