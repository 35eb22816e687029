//! Result types shared by the aggregator, the CLI, and the HTTP server.

use serde::Serialize;
use std::fmt;

/// Category of a search hit. Serialized in lowercase (`"program"`, `"faq"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Program,
    News,
    Faculty,
    Notice,
    Faq,
    Activity,
    Career,
    Page,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Program => "program",
            ResultKind::News => "news",
            ResultKind::Faculty => "faculty",
            ResultKind::Notice => "notice",
            ResultKind::Faq => "faq",
            ResultKind::Activity => "activity",
            ResultKind::Career => "career",
            ResultKind::Page => "page",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One ranked search hit, in the shape the front end consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    /// At most `description_max_chars` characters, `...`-suffixed when cut.
    pub description: String,
    /// Front-end route: `path_prefix + item_id`, or a static page path.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub icon: String,
    pub score: u32,
}

/// A fixed, non-database page that is always searchable.
#[derive(Debug, Clone)]
pub struct StaticPage {
    pub title: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

/// Cut `text` to `max_chars` characters and append `...` when anything was
/// removed. Text at or under the limit is returned verbatim.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
