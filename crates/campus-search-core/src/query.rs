//! Query normalization.
//!
//! Rejects queries too short to be useful before any store round-trip is
//! made; single characters match nearly every document.

/// Minimum accepted query length, in characters, after trimming.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// A query that passed the length gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Trimmed query as the user typed it. Echoed back in responses.
    pub display: String,
    /// Trimmed, lowercased query used for all comparisons.
    pub folded: String,
}

/// Trim and case-fold `raw`. Returns `None` when the trimmed query has fewer
/// than `min_chars` characters (including a missing query).
pub fn normalize(raw: Option<&str>, min_chars: usize) -> Option<NormalizedQuery> {
    let trimmed = raw?.trim();
    if trimmed.chars().count() < min_chars {
        return None;
    }
    Some(NormalizedQuery {
        display: trimmed.to_string(),
        folded: trimmed.to_lowercase(),
    })
}
