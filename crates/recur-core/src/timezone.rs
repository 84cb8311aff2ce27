use crate::error::CoreError;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Parse an IANA timezone name
pub fn parse_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone).map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))
}

/// Validate IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<(), CoreError> {
    parse_timezone(timezone).map(|_| ())
}

/// Express a UTC instant in the given timezone.
pub fn to_local(datetime: DateTime<Utc>, timezone: Tz) -> DateTime<Tz> {
    datetime.with_timezone(&timezone)
}

/// Format a datetime as an RFC 5545 `DTSTART` line.
///
/// UTC uses the `Z` form; any other zone carries a `TZID` parameter with the
/// local wall-clock time.
pub fn format_dtstart<T: TimeZone>(datetime: &DateTime<T>, timezone: Tz) -> String {
    let local = datetime.with_timezone(&timezone);
    if timezone == Tz::UTC {
        format!("DTSTART:{}", local.format("%Y%m%dT%H%M%SZ"))
    } else {
        format!(
            "DTSTART;TZID={}:{}",
            timezone.name(),
            local.format("%Y%m%dT%H%M%S")
        )
    }
}

/// Get timezone abbreviation (e.g., "EST", "EDT")
pub fn get_timezone_abbreviation(timezone: &str, at_time: DateTime<Utc>) -> Result<String, CoreError> {
    let tz = parse_timezone(timezone)?;
    let local_dt = at_time.with_timezone(&tz);
    Ok(format!("{}", local_dt.format("%Z")))
}
