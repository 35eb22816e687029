//! Federated search: concurrent per-source fan-out, scoring, and merge.
//!
//! # Pipeline
//!
//! 1. Normalize the query; short queries stop here with no store access.
//! 2. Ping the store. A failure here is the only terminal error.
//! 3. Score static pages in-process.
//! 4. Fetch every source concurrently with [`futures::future::join_all`],
//!    each under its own timeout. Failed or timed-out sources are logged at
//!    warn level and skipped.
//! 5. Match and score each source's items.
//! 6. Merge pages then sources in registry order, stable-sort by score,
//!    truncate to the limit, and report the pre-truncation total.

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

use campus_search_core::models::SearchResult;
use campus_search_core::query::{self, NormalizedQuery};
use campus_search_core::rank::{merge_ranked, scan_pages, scan_source, Ranked, ScanOptions};
use campus_search_core::store::{fetch_candidates, DocumentStore};

use crate::config::{Config, SearchConfig};
use crate::error::SearchError;
use crate::sources::Registry;
use crate::sqlite_store::SqliteStore;

/// Result of one search call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was missing or shorter than the minimum length.
    Rejected { min_chars: usize },
    Ranked { query: String, ranked: Ranked },
}

/// Scatter-gather search over a [`Registry`] backed by a [`DocumentStore`].
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct Aggregator {
    store: Arc<dyn DocumentStore>,
    registry: Arc<Registry>,
    settings: SearchConfig,
}

impl Aggregator {
    pub fn new(store: Arc<dyn DocumentStore>, registry: Arc<Registry>, settings: SearchConfig) -> Self {
        Self {
            store,
            registry,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    pub async fn search(&self, raw_query: Option<&str>, limit: usize) -> Result<SearchOutcome, SearchError> {
        let min_chars = self.settings.min_query_chars;
        let query = match query::normalize(raw_query, min_chars) {
            Some(q) => q,
            None => return Ok(SearchOutcome::Rejected { min_chars }),
        };

        self.store
            .ping()
            .await
            .map_err(|e| SearchError::StoreUnavailable(format!("{:#}", e)))?;

        let ranked = self.gather(&query, limit).await;
        tracing::debug!(
            query = %query.display,
            total = ranked.total,
            returned = ranked.results.len(),
            "search complete"
        );

        Ok(SearchOutcome::Ranked {
            query: query.display,
            ranked,
        })
    }

    async fn gather(&self, query: &NormalizedQuery, limit: usize) -> Ranked {
        let opts = ScanOptions {
            folded_query: &query.folded,
            weights: &self.settings.weights,
            description_max_chars: self.settings.description_max_chars,
        };
        let timeout = self.settings.source_timeout();

        let fetches = self.registry.sources.iter().map(|source| async move {
            let outcome = tokio::time::timeout(timeout, fetch_candidates(self.store.as_ref(), source)).await;
            (source, outcome)
        });
        let outcomes = futures::future::join_all(fetches).await;

        let mut groups: Vec<Vec<SearchResult>> = Vec::with_capacity(outcomes.len() + 1);
        groups.push(scan_pages(&self.registry.pages, &opts));

        for (source, outcome) in outcomes {
            match outcome {
                Ok(Ok(items)) => {
                    let hits = scan_source(source, &items, &opts);
                    tracing::debug!(
                        collection = source.collection,
                        scanned = items.len(),
                        matched = hits.len(),
                        "source scanned"
                    );
                    groups.push(hits);
                }
                Ok(Err(err)) => {
                    tracing::warn!(
                        collection = source.collection,
                        error = %format!("{:#}", err),
                        "source failed, skipping"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        collection = source.collection,
                        timeout_ms = self.settings.source_timeout_ms,
                        "source timed out, skipping"
                    );
                }
            }
        }

        merge_ranked(groups, limit)
    }
}

/// JSON body returned by `GET /api/search` and `search --json`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            results: Vec::new(),
            total: None,
            query: None,
            message: Some(message.into()),
        }
    }
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Rejected { min_chars } => Self {
                success: true,
                results: Vec::new(),
                total: None,
                query: None,
                message: Some(format!("Query must be at least {} characters", min_chars)),
            },
            SearchOutcome::Ranked { query, ranked } => Self {
                success: true,
                results: ranked.results,
                total: Some(ranked.total),
                query: Some(query),
                message: None,
            },
        }
    }
}

/// `campus-search search` entry point.
pub async fn run_search(config: &Config, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let store = Arc::new(SqliteStore::open(config).await?);
    let aggregator = Aggregator::new(
        store.clone(),
        Arc::new(Registry::university()),
        config.search.clone(),
    );
    let limit = config.search.clamp_limit(limit);
    let outcome = aggregator.search(Some(query), limit).await?;
    store.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&SearchResponse::from(outcome))?);
        return Ok(());
    }

    match outcome {
        SearchOutcome::Rejected { min_chars } => {
            println!("Query must be at least {} characters", min_chars);
        }
        SearchOutcome::Ranked { ranked, .. } if ranked.results.is_empty() => {
            println!("No results.");
        }
        SearchOutcome::Ranked { ranked, .. } => {
            for (i, result) in ranked.results.iter().enumerate() {
                println!("{}. [{}] {} / {}", i + 1, result.score, result.kind, result.title);
                println!("    path: {}", result.path);
                if !result.description.is_empty() {
                    println!("    excerpt: \"{}\"", result.description.replace('\n', " ").trim());
                }
                println!();
            }
            println!("{} of {} results", ranked.results.len(), ranked.total);
        }
    }

    Ok(())
}
