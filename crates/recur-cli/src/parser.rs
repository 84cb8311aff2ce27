use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;

/// Parses a human-friendly date in the given timezone and returns it in UTC.
pub fn parse_date(date_str: &str, timezone: Tz) -> Result<DateTime<Utc>> {
    let now = Utc::now().with_timezone(&timezone);
    parse_date_string(date_str, now, Dialect::Us)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}
