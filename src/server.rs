//! HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/search?q=&limit=` | Federated search |
//! | `GET`  | `/search?q=&limit=` | Alias of `/api/search` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Response Contract
//!
//! ```json
//! { "success": true, "results": [ ... ], "total": 5, "query": "cse" }
//! { "success": true, "results": [], "message": "Query must be at least 2 characters" }
//! { "success": false, "results": [], "message": "document store unavailable: ..." }
//! ```
//!
//! The last shape is served with status 500. Failures of individual sources
//! never reach the client; they only shrink the result set.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the website can call
//! the API from the browser.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::search::{Aggregator, SearchResponse};
use crate::sources::Registry;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    aggregator: Arc<Aggregator>,
}

/// Start the server on `[server].bind` against the configured SQLite store.
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(SqliteStore::open(config).await?);
    let aggregator = Aggregator::new(store, Arc::new(Registry::university()), config.search.clone());

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "search server listening");
    serve(listener, aggregator).await
}

/// Serve `aggregator` on an already-bound listener.
pub async fn serve(listener: tokio::net::TcpListener, aggregator: Aggregator) -> anyhow::Result<()> {
    axum::serve(listener, router(aggregator)).await?;
    Ok(())
}

pub fn router(aggregator: Aggregator) -> Router {
    let state = AppState {
        aggregator: Arc::new(aggregator),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", get(handle_search))
        .route("/search", get(handle_search))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

/// A search failure rendered as `500 { success: false, message, results: [] }`.
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(SearchResponse::failure(self.message))).into_response()
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/search ============

/// Raw query parameters. `limit` stays a string so a malformed value falls
/// back to the default instead of rejecting the request.
#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<String>,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let limit = state
        .aggregator
        .settings()
        .resolve_limit(params.limit.as_deref());

    let outcome = state
        .aggregator
        .search(params.q.as_deref(), limit)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "search failed");
            AppError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            }
        })?;

    Ok(Json(SearchResponse::from(outcome)))
}
