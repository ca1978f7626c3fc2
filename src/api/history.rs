use axum::extract::State;
use axum::Json;

use crate::error::{ApiError, ApiResult};
use crate::history::{self, LOG_TARGET};
use crate::models::SearchRecord;
use crate::state::AppState;

const RECENT_LIMIT: usize = 10;

/// GET /api/recent-searches - Last ten searches, newest first.
pub async fn recent_searches(State(state): State<AppState>) -> ApiResult<Json<Vec<SearchRecord>>> {
    match history::list_recent(state.history.as_ref(), RECENT_LIMIT).await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            tracing::error!(target: LOG_TARGET, "Failed to list recent searches: {e}");
            Err(ApiError::Internal("Failed to fetch recent searches"))
        }
    }
}
