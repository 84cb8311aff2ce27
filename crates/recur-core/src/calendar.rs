//! Calendar field derivation.
//!
//! Decomposes an occurrence timestamp into the display fields carried by every
//! record. The input is used as-is: it must already be expressed in the rule's
//! calendar/timezone.

use chrono::Datelike;
use serde::Serialize;

use crate::error::ProjectionError;

/// Two-letter weekday codes indexed by ISO weekday number minus one.
pub const WEEKDAY_CODES: [&str; 7] = ["mo", "tu", "we", "th", "fr", "sa", "su"];

/// English month names indexed by zero-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Human-readable calendar fields of a single timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarFields {
    /// Lowercase two-letter code, `mo` through `su`
    pub weekday_code: &'static str,
    /// Day of month, 1-31
    pub day_of_month: u32,
    /// Full English month name
    pub month_name: &'static str,
    /// Month number, 1-12
    pub month_number: u32,
    pub year: i32,
}

/// Maps an ISO-8601 weekday number (Monday = 1 ... Sunday = 7) to its code.
///
/// # Errors
/// Returns `ProjectionError::InvalidWeekday` for any number outside 1-7.
pub fn weekday_code(iso_weekday: u32) -> Result<&'static str, ProjectionError> {
    match iso_weekday {
        1..=7 => Ok(WEEKDAY_CODES[(iso_weekday - 1) as usize]),
        _ => Err(ProjectionError::InvalidWeekday(iso_weekday)),
    }
}

impl CalendarFields {
    /// Derives the display fields of any date-bearing value.
    pub fn derive<D: Datelike>(date: &D) -> Result<Self, ProjectionError> {
        Ok(Self {
            weekday_code: weekday_code(date.weekday().number_from_monday())?,
            day_of_month: date.day(),
            month_name: MONTH_NAMES[date.month0() as usize],
            month_number: date.month(),
            year: date.year(),
        })
    }
}
