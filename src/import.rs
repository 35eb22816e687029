//! Loading CMS exports into the document store.
//!
//! An export file holds either one JSON object or an array of objects. A
//! document's key is its `_id` (string or number); documents without one
//! get a fresh UUID written back into `_id`. Importing the same `_id` again
//! replaces the stored document.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;
use uuid::Uuid;
use walkdir::WalkDir;

use campus_search_core::source::DOCUMENT_KEY;

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// `campus-search import <collection> <file>`.
pub async fn run_import(config: &Config, collection: &str, file: &Path) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let count = import_file(&store, collection, file).await?;
    store.close().await;

    println!("import {}", collection);
    println!("  upserted documents: {}", count);
    println!("ok");
    Ok(())
}

/// `campus-search import --dir <dir>`: every `<collection>.json` below `dir`.
pub async fn run_import_dir(config: &Config, dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("Import directory does not exist: {}", dir.display());
    }

    let store = SqliteStore::open(config).await?;
    let mut files = 0usize;
    let mut total = 0usize;

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let collection = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };
        let count = import_file(&store, &collection, path).await?;
        println!("  {}: {} documents", collection, count);
        files += 1;
        total += count;
    }
    store.close().await;

    println!("import {}", dir.display());
    println!("  files: {}", files);
    println!("  upserted documents: {}", total);
    println!("ok");
    Ok(())
}

async fn import_file(store: &SqliteStore, collection: &str, file: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let parsed: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", file.display()))?;

    let docs = prepare_documents(parsed)
        .with_context(|| format!("Invalid documents in {}", file.display()))?;
    for (id, doc) in &docs {
        store.upsert(collection, id, doc).await?;
    }

    tracing::info!(collection, file = %file.display(), count = docs.len(), "imported documents");
    Ok(docs.len())
}

/// Split an export into `(id, document)` pairs, assigning missing ids.
pub fn prepare_documents(parsed: Value) -> Result<Vec<(String, Value)>> {
    let docs = match parsed {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => bail!("expected a JSON object or an array of objects"),
    };

    docs.into_iter()
        .enumerate()
        .map(|(i, doc)| match doc {
            Value::Object(mut map) => {
                let id = match map.get(DOCUMENT_KEY) {
                    Some(Value::String(s)) if !s.is_empty() => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => {
                        let id = Uuid::new_v4().to_string();
                        map.insert(DOCUMENT_KEY.to_string(), Value::String(id.clone()));
                        id
                    }
                };
                Ok((id, Value::Object(map)))
            }
            _ => bail!("element {} is not a JSON object", i),
        })
        .collect()
}
