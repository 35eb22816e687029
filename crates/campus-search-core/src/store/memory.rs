//! In-memory [`DocumentStore`] for tests and embedding.
//!
//! Collections are `Vec<Value>` behind a `std::sync::RwLock`, kept in
//! insertion order. Inserting a document whose `_id` already exists replaces
//! it in place.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::DocumentStore;
use crate::source::DOCUMENT_KEY;

/// In-memory store keyed by collection name.
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a document. The document must be an object with a
    /// string `_id`.
    pub fn insert(&self, collection: &str, doc: Value) -> Result<()> {
        let id = match doc.get(DOCUMENT_KEY).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => bail!("document in '{}' has no string _id", collection),
        };
        let mut collections = self
            .collections
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs
            .iter_mut()
            .find(|d| d.get(DOCUMENT_KEY).and_then(Value::as_str) == Some(id.as_str()))
        {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
        Ok(())
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|d| d.get(DOCUMENT_KEY).and_then(Value::as_str) == Some(id))
                .cloned()
        }))
    }
}
