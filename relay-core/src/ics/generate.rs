//! ICS file generation.

use chrono::{DateTime, Utc};

use crate::event::IcsInput;

const CRLF: &str = "\r\n";
const PRODID: &str = "-//Relay//Link Tools//EN";

/// Escape a text value per RFC 5545. Backslash must be escaped first so the
/// later replacements are not double-escaped.
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%d").to_string()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Generate an ICS document for one event, CRLF line endings, no trailing
/// newline after `END:VCALENDAR`.
///
/// UID and DTSTAMP come from the wall clock at generation time, so two calls
/// with identical input differ only in those two lines. Lines longer than 75
/// octets are not folded.
pub fn build_ics(input: &IcsInput) -> String {
    build_ics_at(input, Utc::now())
}

// Clock passed in so tests can pin it.
fn build_ics_at(input: &IcsInput, now: DateTime<Utc>) -> String {
    let uid = format!("{}@relay", now.timestamp_millis());
    let dtstamp = format_utc(&now);

    let (dtstart, dtend) = if input.all_day {
        (
            format!("DTSTART;VALUE=DATE:{}", format_date(&input.start)),
            format!("DTEND;VALUE=DATE:{}", format_date(&input.end)),
        )
    } else {
        (
            format!("DTSTART:{}", format_utc(&input.start)),
            format!("DTEND:{}", format_utc(&input.end)),
        )
    };

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", uid),
        format!("DTSTAMP:{}", dtstamp),
        dtstart,
        dtend,
        format!("SUMMARY:{}", escape_text(&input.title)),
    ];

    if let Some(description) = non_empty(&input.description) {
        lines.push(format!("DESCRIPTION:{}", escape_text(description)));
    }
    if let Some(location) = non_empty(&input.location) {
        lines.push(format!("LOCATION:{}", escape_text(location)));
    }
    if let Some(url) = non_empty(&input.url) {
        lines.push(format!("URL:{}", escape_text(url)));
    }
    if let (Some(name), Some(email)) = (
        non_empty(&input.organizer_name),
        non_empty(&input.organizer_email),
    ) {
        lines.push(format!("ORGANIZER;CN={}:MAILTO:{}", escape_text(name), email));
    }

    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    lines.join(CRLF)
}
