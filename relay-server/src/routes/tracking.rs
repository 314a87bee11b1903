//! Tracking link endpoint

use axum::{Json, Router, extract::State, routing::post};

use relay_core::build_tracking_link;
use relay_core::history::Tool;
use relay_core::tracking::{TrackingInput, TrackingLink};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/tracking", post(build_tracking))
}

/// POST /tracking - Build a UTM-tagged tracking link
async fn build_tracking(
    State(state): State<AppState>,
    Json(input): Json<TrackingInput>,
) -> Result<Json<TrackingLink>, AppError> {
    if input.destination.trim().is_empty() {
        return Err(AppError::unprocessable("destination must not be empty"));
    }

    let link = build_tracking_link(&input)?;

    let payload = serde_json::to_value(&input)?;
    state.record(Tool::Tracking, &input.destination, payload)?;

    Ok(Json(link))
}
