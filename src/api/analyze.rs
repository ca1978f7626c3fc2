use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::{ApiError, ApiResult};
use crate::llm::analyze::analyze_code;
use crate::models::{AnalyzeRequest, AnalyzeResponse};
use crate::state::AppState;

/// POST /api/analyze - Explain a code snippet.
///
/// Generation failures still answer 200 with the fallback analysis text.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected analyze body: {e}");
        ApiError::InvalidBody
    })?;

    if req.code.trim().is_empty() || req.language.trim().is_empty() {
        return Err(ApiError::InvalidBody);
    }

    let analysis = analyze_code(state.generator.as_ref(), &req.code, req.language.trim()).await;
    Ok(Json(AnalyzeResponse { analysis }))
}
