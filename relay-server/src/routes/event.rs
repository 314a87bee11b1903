//! Event link and ICS endpoints

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::post,
};
use chrono::Duration;
use serde::Serialize;

use relay_core::event::{EventInput, IcsInput};
use relay_core::history::Tool;
use relay_core::{build_calendar_links, build_ics};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event", post(build_event))
        .route("/event/ics", post(download_ics))
}

/// Response for POST /event
#[derive(Serialize)]
pub struct EventResponse {
    pub google: String,
    pub outlook: String,
    pub ics: String,
}

fn validate(input: &EventInput) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::unprocessable("title must not be empty"));
    }
    if let Some(end) = input.end {
        if end <= input.start {
            return Err(AppError::unprocessable("end must be after start"));
        }
    }
    Ok(())
}

/// Resolve the end instant and build the ICS document. All-day ends are
/// exclusive, so the last included day is pushed out by one.
fn event_ics(input: &EventInput) -> String {
    let end = input.end.unwrap_or(input.start + Duration::minutes(60));
    let ics_end = if input.all_day {
        end + Duration::days(1)
    } else {
        end
    };

    build_ics(&IcsInput {
        title: input.title.clone(),
        description: input.description.clone(),
        location: input.location.clone(),
        start: input.start,
        end: ics_end,
        all_day: input.all_day,
        url: input.url.clone(),
        organizer_name: input.organizer_name.clone(),
        organizer_email: input.organizer_email.clone(),
    })
}

/// POST /event - Build Google/Outlook links and the ICS document
async fn build_event(
    State(state): State<AppState>,
    Json(input): Json<EventInput>,
) -> Result<Json<EventResponse>, AppError> {
    validate(&input)?;

    let links = build_calendar_links(&input);
    let ics = event_ics(&input);

    let payload = serde_json::to_value(&input)?;
    state.record(Tool::Event, &input.title, payload)?;

    Ok(Json(EventResponse {
        google: links.google,
        outlook: links.outlook,
        ics,
    }))
}

/// POST /event/ics - Build the ICS document as a calendar download
async fn download_ics(
    State(state): State<AppState>,
    Json(input): Json<EventInput>,
) -> Result<impl IntoResponse, AppError> {
    validate(&input)?;

    let ics = event_ics(&input);

    let payload = serde_json::to_value(&input)?;
    state.record(Tool::Event, &input.title, payload)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"event.ics\"",
            ),
        ],
        ics,
    ))
}
