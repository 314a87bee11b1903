//! WooCommerce link endpoint

use axum::{Json, Router, extract::State, routing::post};

use relay_core::build_woo_links;
use relay_core::history::Tool;
use relay_core::woo::{WooInput, WooLinks};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/woo", post(build_woo))
}

/// POST /woo - Build WooCommerce add-to-cart links
async fn build_woo(
    State(state): State<AppState>,
    Json(input): Json<WooInput>,
) -> Result<Json<WooLinks>, AppError> {
    if input.products.is_empty() {
        return Err(AppError::unprocessable("at least one product is required"));
    }

    let links = build_woo_links(&input)?;

    let payload = serde_json::to_value(&input)?;
    state.record(Tool::Woo, &input.base_url, payload)?;

    Ok(Json(links))
}
