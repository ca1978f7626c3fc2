//! Search history: every completed search is stored with its results.

pub mod store;

pub use store::{JsonLinesStore, MemoryStore, SearchStore};

use crate::models::{SearchRecord, SearchResult};

/// Tracing target for persistence problems, kept apart from search and
/// generation logs so operators can filter on it.
pub const LOG_TARGET: &str = "code_scout::history";

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("history write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Store one search with its results encoded as a JSON array.
pub async fn record(
    store: &dyn SearchStore,
    query: &str,
    results: &[SearchResult],
) -> Result<SearchRecord, HistoryError> {
    let serialized = serde_json::to_string(results)?;
    let saved = store.save(query, &serialized).await?;
    tracing::debug!(target: LOG_TARGET, "Recorded search #{} ({} results)", saved.id, results.len());
    Ok(saved)
}

/// Most recent searches first.
pub async fn list_recent(
    store: &dyn SearchStore,
    limit: usize,
) -> Result<Vec<SearchRecord>, HistoryError> {
    store.list_recent(limit).await
}

impl SearchRecord {
    /// Decode the stored result set.
    pub fn decoded_results(&self) -> Result<Vec<SearchResult>, HistoryError> {
        Ok(serde_json::from_str(&self.results)?)
    }
}
