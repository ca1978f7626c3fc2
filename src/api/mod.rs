pub mod analyze;
pub mod history;
pub mod search;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(search::search))
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/recent-searches", get(history::recent_searches))
        .with_state(state)
}
