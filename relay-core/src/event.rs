//! Input records for the calendar builders.
//!
//! Callers (the CLI and the HTTP server) collect user input into these
//! records, call exactly one builder, and render the returned strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for calendar deep links (Google Calendar / Outlook Web).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Event start instant
    pub start: DateTime<Utc>,
    /// Explicit end; defaults to start + 60 minutes when absent
    pub end: Option<DateTime<Utc>>,
    /// IANA timezone name, informational only (never applied to UTC formatting)
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Date-granularity event; the end date is exclusive
    #[serde(default)]
    pub all_day: bool,
    /// Event URL, appended to the details/body text
    pub url: Option<String>,
    pub organizer_name: Option<String>,
    pub organizer_email: Option<String>,
}

/// Input for ICS generation.
///
/// Start and end are already resolved. For all-day events the caller passes
/// the exclusive end date (the day after the last included day); the builder
/// performs no adjustment of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcsInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    pub url: Option<String>,
    pub organizer_name: Option<String>,
    pub organizer_email: Option<String>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}
