//! Source descriptors: where searchable items live and which of their
//! fields are searched.
//!
//! A [`SearchSource`] is pure configuration. The aggregator treats every
//! source the same way, so adding a collection to search means adding one
//! descriptor to the registry and nothing else.

use serde_json::Value;
use std::borrow::Cow;

use crate::models::ResultKind;

/// Key every stored document carries, assigned on import.
pub const DOCUMENT_KEY: &str = "_id";

/// How a source's items are stored in the document database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceShape {
    /// One document (looked up by `doc_id`) holds every item in the array
    /// field `array_field`.
    SingleDocument {
        doc_id: &'static str,
        array_field: &'static str,
    },
    /// Every document in the collection is an item.
    MultiDocument,
}

/// Location of a value inside an item. At most one level of nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Key(&'static str),
    Nested(&'static str, &'static str),
}

impl FieldPath {
    pub fn resolve<'a>(&self, item: &'a Value) -> Option<&'a Value> {
        match self {
            FieldPath::Key(key) => item.get(key),
            FieldPath::Nested(parent, child) => item.get(parent)?.get(child),
        }
    }

    /// Resolve to searchable text, skipping nulls, objects, and empty lists.
    pub fn text<'a>(&self, item: &'a Value) -> Option<FieldText<'a>> {
        FieldText::from_value(self.resolve(item)?)
    }

    /// Resolve to a single display string. Lists are joined with `", "`.
    pub fn display(&self, item: &Value) -> Option<String> {
        match self.text(item)? {
            FieldText::Scalar(s) => Some(s.into_owned()),
            FieldText::List(items) => Some(items.join(", ")),
        }
    }
}

/// Text extracted from one field of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldText<'a> {
    Scalar(Cow<'a, str>),
    /// A list of strings, e.g. program highlights. Non-string elements are
    /// stringified the same way scalars are.
    List(Vec<Cow<'a, str>>),
}

impl<'a> FieldText<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                let texts: Vec<Cow<'a, str>> = items.iter().filter_map(scalar_text).collect();
                if texts.is_empty() {
                    None
                } else {
                    Some(FieldText::List(texts))
                }
            }
            other => scalar_text(other).map(FieldText::Scalar),
        }
    }
}

fn non_empty_id(path: &FieldPath, item: &Value) -> Option<String> {
    path.resolve(item)
        .and_then(scalar_text)
        .filter(|id| !id.is_empty())
        .map(Cow::into_owned)
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// One searched field and whether it counts as a title for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    pub path: FieldPath,
    /// Title-like fields earn the exact / prefix / contains tiers.
    pub primary: bool,
}

impl SearchField {
    pub const fn title(key: &'static str) -> Self {
        Self {
            path: FieldPath::Key(key),
            primary: true,
        }
    }

    pub const fn text(key: &'static str) -> Self {
        Self {
            path: FieldPath::Key(key),
            primary: false,
        }
    }

    pub const fn nested(parent: &'static str, child: &'static str) -> Self {
        Self {
            path: FieldPath::Nested(parent, child),
            primary: false,
        }
    }
}

/// Descriptor for one searchable collection.
#[derive(Debug, Clone)]
pub struct SearchSource {
    pub kind: ResultKind,
    pub collection: &'static str,
    pub shape: SourceShape,
    /// Searched in order; the same order drives scoring.
    pub fields: Vec<SearchField>,
    pub title_field: FieldPath,
    pub description_field: FieldPath,
    pub id_field: FieldPath,
    pub path_prefix: &'static str,
    pub icon: &'static str,
}

impl SearchSource {
    /// Identifier used to build the result path.
    ///
    /// When the id field is missing, array items fall back to their index
    /// within the single document, which is stable for a given document.
    /// Collection documents fall back to their store key `_id`.
    pub fn item_id(&self, item: &Value, position: usize) -> String {
        if let Some(id) = non_empty_id(&self.id_field, item) {
            return id;
        }
        match self.shape {
            SourceShape::SingleDocument { .. } => position.to_string(),
            SourceShape::MultiDocument => {
                non_empty_id(&FieldPath::Key(DOCUMENT_KEY), item).unwrap_or_default()
            }
        }
    }

    pub fn item_path(&self, item: &Value, position: usize) -> String {
        format!("{}{}", self.path_prefix, self.item_id(item, position))
    }

    /// Human-readable shape, used by `campus-search sources`.
    pub fn shape_label(&self) -> String {
        match &self.shape {
            SourceShape::MultiDocument => "multi".to_string(),
            SourceShape::SingleDocument {
                doc_id,
                array_field,
            } => format!("single:{}/{}", doc_id, array_field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn faq_source() -> SearchSource {
        SearchSource {
            kind: ResultKind::Faq,
            collection: "admissions",
            shape: SourceShape::SingleDocument {
                doc_id: "admissions-page",
                array_field: "faqs",
            },
            fields: vec![SearchField::title("question"), SearchField::text("answer")],
            title_field: FieldPath::Key("question"),
            description_field: FieldPath::Key("answer"),
            id_field: FieldPath::Key("id"),
            path_prefix: "/admissions#faq-",
            icon: "help-circle",
        }
    }

    #[test]
    fn test_resolve_nested() {
        let item = json!({ "details": { "duration": "4 years" } });
        let path = FieldPath::Nested("details", "duration");
        assert_eq!(
            path.text(&item),
            Some(FieldText::Scalar(Cow::Borrowed("4 years")))
        );
    }

    #[test]
    fn test_resolve_missing_parent() {
        let item = json!({ "title": "x" });
        assert!(FieldPath::Nested("details", "duration").resolve(&item).is_none());
    }

    #[test]
    fn test_list_field_skips_non_scalars() {
        let item = json!({ "highlights": ["Labs", { "x": 1 }, 42] });
        match FieldPath::Key("highlights").text(&item) {
            Some(FieldText::List(items)) => assert_eq!(items, vec!["Labs", "42"]),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_is_absent() {
        let item = json!({ "highlights": [] });
        assert!(FieldPath::Key("highlights").text(&item).is_none());
    }

    #[test]
    fn test_item_path_uses_id_field() {
        let item = json!({ "id": "fees", "question": "What are the fees?" });
        assert_eq!(faq_source().item_path(&item, 3), "/admissions#faq-fees");
    }

    #[test]
    fn test_item_path_falls_back_to_position() {
        let item = json!({ "question": "When does the semester start?" });
        assert_eq!(faq_source().item_path(&item, 3), "/admissions#faq-3");
    }

    fn news_source() -> SearchSource {
        SearchSource {
            kind: ResultKind::News,
            collection: "news",
            shape: SourceShape::MultiDocument,
            fields: vec![SearchField::title("title")],
            title_field: FieldPath::Key("title"),
            description_field: FieldPath::Key("excerpt"),
            id_field: FieldPath::Key("slug"),
            path_prefix: "/news/",
            icon: "newspaper",
        }
    }

    #[test]
    fn test_collection_document_without_slug_uses_store_key() {
        let item = json!({ "_id": "3f2a", "title": "Open Day" });
        assert_eq!(news_source().item_path(&item, 5), "/news/3f2a");
    }

    #[test]
    fn test_collection_document_never_uses_position() {
        let item = json!({ "title": "Open Day", "slug": "" });
        assert_eq!(news_source().item_path(&item, 5), "/news/");
    }

    #[test]
    fn test_numeric_id() {
        let item = json!({ "id": 7 });
        assert_eq!(faq_source().item_id(&item, 0), "7");
    }

    #[test]
    fn test_shape_label() {
        assert_eq!(faq_source().shape_label(), "single:admissions-page/faqs");
    }
}
