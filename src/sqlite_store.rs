//! SQLite-backed [`DocumentStore`].
//!
//! Each document is stored as JSON text in the `documents` table, keyed by
//! `(collection, id)`. `seq` records first-insertion order so `find_all`
//! returns documents in the order they were imported, matching the
//! in-memory store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use campus_search_core::store::DocumentStore;

use crate::config::Config;
use crate::{db, migrate};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the configured database and make sure the schema exists.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::apply(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Insert a document, or replace the body of an existing one with the
    /// same id (keeping its original position).
    pub async fn upsert(&self, collection: &str, id: &str, doc: &Value) -> Result<()> {
        let body = serde_json::to_string(doc)?;
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body, seq, updated_at)
            VALUES (?, ?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM documents WHERE collection = ?), ?)
            ON CONFLICT(collection, id) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(&body)
        .bind(collection)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self, collection: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn parse_body(collection: &str, id: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .with_context(|| format!("Corrupt JSON body for document {}/{}", collection, id))
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("database unreachable")?;
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>> {
        let rows = sqlx::query("SELECT id, body FROM documents WHERE collection = ? ORDER BY seq")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let body: String = row.get("body");
                parse_body(collection, &id, &body)
            })
            .collect()
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let body: String = row.get("body");
                Ok(Some(parse_body(collection, id, &body)?))
            }
            None => Ok(None),
        }
    }
}
