use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::error::{ApiError, ApiResult};
use crate::models::{SearchParams, SearchResult};
use crate::search::pipeline::run_search;
use crate::state::AppState;

/// GET /api/search?q=... - Enhance the query, search GitHub, fetch file contents.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let Query(params) = params.map_err(|e| {
        tracing::debug!("Rejected search parameters: {e}");
        ApiError::InvalidQuery
    })?;
    let query = params.q.unwrap_or_default();

    let results = run_search(&state, &query).await?;
    Ok(Json(results))
}
