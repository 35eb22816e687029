//! # Campus Search
//!
//! Federated search for a university website. A query is fanned out over
//! every configured document collection (programs, news, faculty, notices,
//! FAQs, student activities, careers) plus a fixed list of static pages;
//! matches are scored by field weight, merged, and returned as one ranked
//! list.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌────────────┐
//!  GET /api/search │   server   │   campus-search search "<q>"
//!  ───────────────▶│   (axum)   │◀──────────────┐
//!                  └─────┬──────┘               │
//!                        ▼                      │
//!                  ┌────────────┐   join_all    ┌──────────────┐
//!                  │ Aggregator │──────────────▶│ DocumentStore│
//!                  │  (search)  │ per-source    │ SQLite / mem │
//!                  └────────────┘  timeout      └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! campus-search init
//! campus-search import --dir ./seed
//! campus-search search "computer science"
//! campus-search serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`sources`] | Source registry and static pages |
//! | [`search`] | Aggregator and response shape |
//! | [`server`] | HTTP server |
//! | [`sqlite_store`] | SQLite document store |
//! | [`import`] | Loading JSON exports |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod migrate;
pub mod search;
pub mod server;
pub mod sources;
pub mod sqlite_store;
