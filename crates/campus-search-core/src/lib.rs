//! # Campus Search Core
//!
//! Runtime-agnostic logic for the campus search aggregator: result models,
//! source descriptors, query normalization, matching, scoring, ranking, and
//! the document store abstraction.
//!
//! This crate contains no tokio, sqlx, or network dependencies. Fan-out,
//! timeouts, and the HTTP surface live in the `campus-search` crate.
//!
//! ## Pipeline
//!
//! ```text
//! raw query ──▶ query::normalize ──▶ store::fetch_candidates (per source)
//!                                          │
//!                                          ▼
//!                 matcher::item_matches ──▶ scoring::score_item
//!                                          │
//!                                          ▼
//!                               rank::merge_ranked ──▶ Ranked { results, total }
//! ```

pub mod matcher;
pub mod models;
pub mod query;
pub mod rank;
pub mod scoring;
pub mod source;
pub mod store;
