//! Terminal search failures.
//!
//! Per-source failures are not errors at this level: the aggregator logs and
//! skips them. Only a failure that prevents any source from being tried
//! surfaces as a [`SearchError`].

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The document store did not answer the pre-flight ping.
    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),
}
