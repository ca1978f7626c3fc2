use crate::error::ApiError;
use crate::history::{self, LOG_TARGET as HISTORY_TARGET};
use crate::llm::query_enhance::enhance_query;
use crate::models::SearchResult;
use crate::search::aggregate::aggregate;
use crate::state::AppState;

/// Full search flow for one request:
///   1. Query enhancement (LLM, with local fallback)
///   2. GitHub code search, one page
///   3. Concurrent content retrieval, failures dropped
///   4. History record (failure logged, never returned)
pub async fn run_search(state: &AppState, raw_query: &str) -> Result<Vec<SearchResult>, ApiError> {
    let query = raw_query.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidQuery);
    }

    // ── Step 1: Query enhancement ────────────────────────────
    let enhanced = enhance_query(state.generator.as_ref(), query).await;

    // ── Step 2: Code search ──────────────────────────────────
    let hits = state
        .github
        .search_code(&enhanced, state.config.github.per_page)
        .await
        .map_err(|e| {
            tracing::error!("GitHub search failed for {enhanced:?}: {e}");
            ApiError::from_search_host(&e)
        })?;

    // ── Step 3: Fan-out content fetch ────────────────────────
    let hit_count = hits.len();
    let results = aggregate(state.github.clone(), hits).await;
    tracing::info!("Retrieved content for {}/{} hits", results.len(), hit_count);

    // ── Step 4: History ──────────────────────────────────────
    if let Err(e) = history::record(state.history.as_ref(), query, &results).await {
        tracing::error!(target: HISTORY_TARGET, "Failed to record search {query:?}: {e}");
    }

    Ok(results)
}

