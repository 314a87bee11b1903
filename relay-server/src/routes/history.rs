//! History endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use relay_core::history::{History, HistoryEntry, Tool};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(all_history))
        .route("/history/{tool}", get(tool_history))
}

/// GET /history - Recent submissions for every tool
async fn all_history(State(state): State<AppState>) -> Json<History> {
    Json(state.snapshot())
}

/// GET /history/:tool - Recent submissions for one tool
async fn tool_history(
    State(state): State<AppState>,
    Path(tool): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let tool: Tool = tool
        .parse()
        .map_err(|err: String| AppError::unprocessable(err))?;

    Ok(Json(state.recent(tool)))
}
