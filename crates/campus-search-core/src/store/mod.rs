//! Document store abstraction.
//!
//! The [`DocumentStore`] trait is the only way the aggregator touches the
//! database. Documents are plain JSON objects grouped into named
//! collections, keyed by their `_id`.
//!
//! Implementations must be `Send + Sync` so a single store can be shared by
//! concurrent per-source fetches and concurrent requests.

pub mod memory;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::source::{SearchSource, SourceShape};

/// Read-only access to a collection-of-documents database.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`ping`](DocumentStore::ping) | Fail fast when the store is unreachable |
/// | [`find_all`](DocumentStore::find_all) | Every document in a collection |
/// | [`find_by_id`](DocumentStore::find_by_id) | One document by `_id` |
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ping(&self) -> Result<()>;

    /// Documents in insertion order. An unknown collection is empty, not an error.
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>>;
}

/// Fetch the candidate items for one source, according to its shape.
///
/// A missing single document or missing array field yields no items. An
/// array field holding something other than an array is an error, which the
/// caller treats as a failed source.
pub async fn fetch_candidates(store: &dyn DocumentStore, source: &SearchSource) -> Result<Vec<Value>> {
    match &source.shape {
        SourceShape::MultiDocument => store.find_all(source.collection).await,
        SourceShape::SingleDocument {
            doc_id,
            array_field,
        } => {
            let doc = match store.find_by_id(source.collection, doc_id).await? {
                Some(doc) => doc,
                None => return Ok(Vec::new()),
            };
            match doc {
                Value::Object(mut map) => match map.remove(*array_field) {
                    Some(Value::Array(items)) => Ok(items),
                    Some(Value::Null) | None => Ok(Vec::new()),
                    Some(_) => bail!(
                        "field '{}' of {}/{} is not an array",
                        array_field,
                        source.collection,
                        doc_id
                    ),
                },
                _ => bail!("document {}/{} is not an object", source.collection, doc_id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryStore;
    use super::*;
    use crate::models::ResultKind;
    use crate::source::{FieldPath, SearchField};
    use serde_json::json;

    fn activities() -> SearchSource {
        SearchSource {
            kind: ResultKind::Activity,
            collection: "studentLife",
            shape: SourceShape::SingleDocument {
                doc_id: "student-life",
                array_field: "activities",
            },
            fields: vec![SearchField::title("title")],
            title_field: FieldPath::Key("title"),
            description_field: FieldPath::Key("description"),
            id_field: FieldPath::Key("id"),
            path_prefix: "/student-life#",
            icon: "users",
        }
    }

    #[tokio::test]
    async fn test_single_document_array() {
        let store = InMemoryStore::new();
        store
            .insert(
                "studentLife",
                json!({ "_id": "student-life", "activities": [{ "title": "Debate Club" }, { "title": "Robotics" }] }),
            )
            .unwrap();
        let items = fetch_candidates(&store, &activities()).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["title"], "Robotics");
    }

    #[tokio::test]
    async fn test_single_document_missing() {
        let store = InMemoryStore::new();
        let items = fetch_candidates(&store, &activities()).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_single_document_wrong_type() {
        let store = InMemoryStore::new();
        store
            .insert("studentLife", json!({ "_id": "student-life", "activities": "none" }))
            .unwrap();
        assert!(fetch_candidates(&store, &activities()).await.is_err());
    }

    #[tokio::test]
    async fn test_multi_document() {
        let store = InMemoryStore::new();
        store.insert("notices", json!({ "_id": "n1", "title": "Exam" })).unwrap();
        store.insert("notices", json!({ "_id": "n2", "title": "Holiday" })).unwrap();
        let source = SearchSource {
            collection: "notices",
            shape: SourceShape::MultiDocument,
            ..activities()
        };
        let items = fetch_candidates(&store, &source).await.unwrap();
        assert_eq!(items.len(), 2);
    }
}
