use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use clap::Args;

use relay_core::event::{EventInput, IcsInput};
use relay_core::history::Tool;
use relay_core::{build_calendar_links, build_ics};

use crate::{config, store};

#[derive(Args)]
pub struct EventArgs {
    /// Event title
    pub title: String,

    /// Start date/time (e.g., "2025-03-20" or "2025-03-20T15:00"); a bare date implies --all-day
    #[arg(short, long)]
    pub start: String,

    /// End date/time
    #[arg(short, long, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration in minutes
    #[arg(short, long, conflicts_with = "end")]
    pub duration: Option<i64>,

    /// Date-granularity event (the end date is exclusive)
    #[arg(long)]
    pub all_day: bool,

    /// Event description
    #[arg(long)]
    pub description: Option<String>,

    /// Event location
    #[arg(short, long)]
    pub location: Option<String>,

    /// Event URL, appended to the details/body text
    #[arg(long)]
    pub url: Option<String>,

    /// Organizer display name (ICS only; needs --organizer-email too)
    #[arg(long)]
    pub organizer_name: Option<String>,

    /// Organizer email (ICS only; needs --organizer-name too)
    #[arg(long)]
    pub organizer_email: Option<String>,

    /// IANA timezone name, recorded with the event but not applied to UTC formatting
    #[arg(short, long)]
    pub timezone: Option<String>,

    /// Write the ICS document to this file instead of printing it
    #[arg(long, value_name = "PATH")]
    pub ics: Option<std::path::PathBuf>,
}

/// Parse a CLI date/time: "2025-03-20" (midnight UTC, flagged as a bare
/// date) or "2025-03-20T15:00".
fn parse_datetime(value: &str) -> Result<(DateTime<Utc>, bool)> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok((date.and_hms_opt(0, 0, 0).unwrap().and_utc(), true));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok((naive.and_utc(), false));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok((naive.and_utc(), false));
    }
    anyhow::bail!(
        "Could not parse date/time '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM",
        value
    )
}

pub fn run(args: EventArgs) -> Result<()> {
    if args.title.trim().is_empty() {
        anyhow::bail!("Title must not be empty");
    }

    let cfg = config::load_config()?;

    let (start, start_is_date) = parse_datetime(&args.start)?;
    let all_day = args.all_day || start_is_date;

    let end = match (&args.end, args.duration) {
        (Some(end_str), _) => {
            let (end, _) = parse_datetime(end_str)?;
            if end <= start {
                anyhow::bail!("End time must be after start time");
            }
            Some(end)
        }
        (None, Some(minutes)) => Some(start + Duration::minutes(minutes)),
        (None, None) => None,
    };

    let input = EventInput {
        title: args.title.clone(),
        description: args.description.clone(),
        location: args.location.clone(),
        start,
        end,
        timezone: args.timezone.unwrap_or(cfg.default_timezone),
        all_day,
        url: args.url.clone(),
        organizer_name: args.organizer_name.clone(),
        organizer_email: args.organizer_email.clone(),
    };

    let links = build_calendar_links(&input);

    // The ICS document needs a resolved end; all-day ends are exclusive, so
    // the last included day is pushed out by one.
    let resolved_end = end.unwrap_or(start + Duration::minutes(60));
    let ics_end = if all_day {
        resolved_end + Duration::days(1)
    } else {
        resolved_end
    };

    let ics = build_ics(&IcsInput {
        title: input.title.clone(),
        description: input.description.clone(),
        location: input.location.clone(),
        start,
        end: ics_end,
        all_day,
        url: input.url.clone(),
        organizer_name: input.organizer_name.clone(),
        organizer_email: input.organizer_email.clone(),
    });

    println!("Google:  {}", links.google);
    println!("Outlook: {}", links.outlook);

    if let Some(path) = &args.ics {
        std::fs::write(path, &ics)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    } else {
        println!();
        println!("{}", ics);
    }

    store::record(Tool::Event, &input.title, serde_json::to_value(&input)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_bare_date() {
        let (dt, is_date) = parse_datetime("2025-03-20").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap());
        assert!(is_date);
    }

    #[test]
    fn test_parse_datetime_minutes() {
        let (dt, is_date) = parse_datetime("2025-03-20T15:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 20, 15, 30, 0).unwrap());
        assert!(!is_date);
    }

    #[test]
    fn test_parse_datetime_seconds() {
        let (dt, _) = parse_datetime("2025-03-20T15:30:45").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 20, 15, 30, 45).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("next tuesday").is_err());
        assert!(parse_datetime("2025-13-40").is_err());
    }
}
