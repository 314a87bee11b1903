//! Google Calendar and Outlook Web deep links.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::event::EventInput;

const GOOGLE_BASE: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE";
const OUTLOOK_BASE: &str = "https://outlook.office.com/calendar/0/deeplink/compose";

/// Deep links for one event, ready to open in the hosted calendar UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarLinks {
    pub google: String,
    pub outlook: String,
}

/// Format a UTC instant as a compact timestamp (20250320T150000Z).
fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Format the date component only (20250320).
fn format_all_day(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%d").to_string()
}

/// Build Google Calendar and Outlook Web event-creation links.
///
/// All query params are emitted even when empty; Google's `dates` param is
/// `{start}/{end}` with both segments date-only for all-day events, full
/// UTC timestamps otherwise. Outlook takes ISO-8601 instants instead.
pub fn build_calendar_links(input: &EventInput) -> CalendarLinks {
    let end_instant = input.end.unwrap_or(input.start + Duration::minutes(60));

    let (start, end) = if input.all_day {
        (format_all_day(&input.start), format_all_day(&end_instant))
    } else {
        (format_utc(&input.start), format_utc(&end_instant))
    };

    let details = [input.description.as_deref(), input.url.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    let location = input.location.as_deref().unwrap_or("");

    // Both bases are known-good constants
    let mut google = Url::parse(GOOGLE_BASE).unwrap();
    google
        .query_pairs_mut()
        .append_pair("text", &input.title)
        .append_pair("details", &details)
        .append_pair("location", location)
        .append_pair("dates", &format!("{}/{}", start, end));

    let (startdt, enddt) = if input.all_day {
        (
            format!("{}T00:00:00Z", input.start.format("%Y-%m-%d")),
            format!("{}T00:00:00Z", end_instant.format("%Y-%m-%d")),
        )
    } else {
        (
            input.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end_instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    };

    let mut outlook = Url::parse(OUTLOOK_BASE).unwrap();
    outlook
        .query_pairs_mut()
        .append_pair("subject", &input.title)
        .append_pair("body", &details)
        .append_pair("location", location)
        .append_pair("startdt", &startdt)
        .append_pair("enddt", &enddt);

    CalendarLinks {
        google: google.to_string(),
        outlook: outlook.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_test_input() -> EventInput {
        EventInput {
            title: "Team Sync".to_string(),
            description: None,
            location: None,
            start: Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap(),
            end: None,
            timezone: "UTC".to_string(),
            all_day: false,
            url: None,
            organizer_name: None,
            organizer_email: None,
        }
    }

    fn query_param(link: &str, key: &str) -> Option<String> {
        let url = Url::parse(link).unwrap();
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_timed_dates_param() {
        let links = build_calendar_links(&make_test_input());

        // Default end is start + 60 minutes
        assert_eq!(
            query_param(&links.google, "dates").unwrap(),
            "20250320T150000Z/20250320T160000Z"
        );
    }

    #[test]
    fn test_explicit_end_wins() {
        let mut input = make_test_input();
        input.end = Some(Utc.with_ymd_and_hms(2025, 3, 20, 17, 30, 0).unwrap());

        let links = build_calendar_links(&input);
        assert_eq!(
            query_param(&links.google, "dates").unwrap(),
            "20250320T150000Z/20250320T173000Z"
        );
    }

    #[test]
    fn test_all_day_dates_are_date_only() {
        let mut input = make_test_input();
        input.all_day = true;
        input.end = Some(Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap());

        let links = build_calendar_links(&input);
        assert_eq!(query_param(&links.google, "dates").unwrap(), "20250320/20250321");
    }

    #[test]
    fn test_details_joins_description_and_url() {
        let mut input = make_test_input();
        input.description = Some("Quarterly planning".to_string());
        input.url = Some("https://example.com/agenda".to_string());

        let links = build_calendar_links(&input);
        assert_eq!(
            query_param(&links.google, "details").unwrap(),
            "Quarterly planning\n\nhttps://example.com/agenda"
        );
        // Outlook's body carries the same text
        assert_eq!(
            query_param(&links.outlook, "body").unwrap(),
            "Quarterly planning\n\nhttps://example.com/agenda"
        );
    }

    #[test]
    fn test_empty_details_parts_dropped() {
        let mut input = make_test_input();
        input.description = Some(String::new());
        input.url = Some("https://example.com".to_string());

        let links = build_calendar_links(&input);
        assert_eq!(
            query_param(&links.google, "details").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_empty_params_still_emitted() {
        let links = build_calendar_links(&make_test_input());

        assert_eq!(query_param(&links.google, "details").unwrap(), "");
        assert_eq!(query_param(&links.google, "location").unwrap(), "");
        assert_eq!(query_param(&links.outlook, "location").unwrap(), "");
    }

    #[test]
    fn test_outlook_timed_instants() {
        let links = build_calendar_links(&make_test_input());

        assert_eq!(
            query_param(&links.outlook, "startdt").unwrap(),
            "2025-03-20T15:00:00.000Z"
        );
        assert_eq!(
            query_param(&links.outlook, "enddt").unwrap(),
            "2025-03-20T16:00:00.000Z"
        );
    }

    #[test]
    fn test_outlook_all_day_midnights() {
        let mut input = make_test_input();
        input.all_day = true;
        input.end = Some(Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap());

        let links = build_calendar_links(&input);
        assert_eq!(
            query_param(&links.outlook, "startdt").unwrap(),
            "2025-03-20T00:00:00Z"
        );
        assert_eq!(
            query_param(&links.outlook, "enddt").unwrap(),
            "2025-03-21T00:00:00Z"
        );
    }

    #[test]
    fn test_bases_preserved() {
        let links = build_calendar_links(&make_test_input());

        assert!(links
            .google
            .starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE&"));
        assert!(links
            .outlook
            .starts_with("https://outlook.office.com/calendar/0/deeplink/compose?"));
    }

    #[test]
    fn test_idempotent() {
        let input = make_test_input();
        assert_eq!(build_calendar_links(&input), build_calendar_links(&input));
    }
}
