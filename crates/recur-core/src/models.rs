use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::calendar::CalendarFields;

/// A timestamp already normalized to the calendar/timezone of its rule.
pub type Timestamp = DateTime<Tz>;

/// Opaque reference to the host record an occurrence belongs to.
///
/// Only used for identity and lookup through the host's own accessors; records
/// never own or manage the host record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostRef(Uuid);

impl HostRef {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for HostRef {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for HostRef {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Recurrence unit of a rule (RFC 5545 `FREQ`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Yearly => "YEARLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Daily => "DAILY",
            Frequency::Hourly => "HOURLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Secondly => "SECONDLY",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid frequency: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yearly" => Ok(Frequency::Yearly),
            "monthly" => Ok(Frequency::Monthly),
            "weekly" => Ok(Frequency::Weekly),
            "daily" => Ok(Frequency::Daily),
            "hourly" => Ok(Frequency::Hourly),
            "minutely" => Ok(Frequency::Minutely),
            "secondly" => Ok(Frequency::Secondly),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl From<rrule::Frequency> for Frequency {
    fn from(freq: rrule::Frequency) -> Self {
        match freq {
            rrule::Frequency::Yearly => Frequency::Yearly,
            rrule::Frequency::Monthly => Frequency::Monthly,
            rrule::Frequency::Weekly => Frequency::Weekly,
            rrule::Frequency::Daily => Frequency::Daily,
            rrule::Frequency::Hourly => Frequency::Hourly,
            rrule::Frequency::Minutely => Frequency::Minutely,
            rrule::Frequency::Secondly => Frequency::Secondly,
        }
    }
}

/// Typed view of the parameters a rule was declared with.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleParameters {
    /// Nominal start (DTSTART); not necessarily the first produced occurrence
    pub start: Timestamp,
    /// Declared end (UNTIL), if any
    pub explicit_end: Option<Timestamp>,
    pub frequency: Frequency,
    pub interval: u32,
}

// ============================================================================
// Projection artifacts
// ============================================================================

/// Frozen copy of a rule's parameters, taken when a record is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSnapshot {
    pub(crate) start: Timestamp,
    pub(crate) until: Timestamp,
    pub(crate) frequency: Frequency,
    pub(crate) interval: u32,
    pub(crate) count: usize,
    pub(crate) occurrences: Vec<Timestamp>,
    pub(crate) canonical_text: String,
}

impl RuleSnapshot {
    /// The rule's nominal start.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// The declared end, or the last produced occurrence when none was declared.
    pub fn until(&self) -> Timestamp {
        self.until
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn occurrences(&self) -> &[Timestamp] {
        &self.occurrences
    }

    pub fn canonical_text(&self) -> &str {
        &self.canonical_text
    }
}

/// A single, display-ready occurrence of a recurring rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccurrenceRecord {
    pub(crate) host_ref: Option<HostRef>,
    pub(crate) occurrence_time: Timestamp,
    pub(crate) repeat_index: usize,
    pub(crate) is_original: bool,
    #[serde(flatten)]
    pub(crate) fields: CalendarFields,
    pub(crate) rule: RuleSnapshot,
}

impl OccurrenceRecord {
    pub fn host_ref(&self) -> Option<HostRef> {
        self.host_ref
    }

    pub fn occurrence_time(&self) -> Timestamp {
        self.occurrence_time
    }

    /// Zero-based position of this occurrence within its rule's sequence.
    pub fn repeat_index(&self) -> usize {
        self.repeat_index
    }

    /// True only for the first produced occurrence (`repeat_index == 0`).
    pub fn is_original(&self) -> bool {
        self.is_original
    }

    pub fn fields(&self) -> &CalendarFields {
        &self.fields
    }

    pub fn weekday_code(&self) -> &'static str {
        self.fields.weekday_code
    }

    pub fn day_of_month(&self) -> u32 {
        self.fields.day_of_month
    }

    pub fn month_name(&self) -> &'static str {
        self.fields.month_name
    }

    pub fn month_number(&self) -> u32 {
        self.fields.month_number
    }

    pub fn year(&self) -> i32 {
        self.fields.year
    }

    pub fn rule(&self) -> &RuleSnapshot {
        &self.rule
    }

    /// Calendar date of the occurrence in its own timezone.
    pub fn date(&self) -> NaiveDate {
        self.occurrence_time.date_naive()
    }
}

/// Display-only record for an instance whose position in the sequence is not
/// resolved yet.
///
/// Borrows the host's materialized occurrence list instead of copying it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimalEventRecord<'a> {
    pub(crate) host_ref: Option<HostRef>,
    pub(crate) occurrence_time: Timestamp,
    #[serde(flatten)]
    pub(crate) fields: CalendarFields,
    pub(crate) occurrences: &'a [Timestamp],
}

impl<'a> MinimalEventRecord<'a> {
    pub fn host_ref(&self) -> Option<HostRef> {
        self.host_ref
    }

    pub fn occurrence_time(&self) -> Timestamp {
        self.occurrence_time
    }

    pub fn fields(&self) -> &CalendarFields {
        &self.fields
    }

    pub fn occurrences(&self) -> &'a [Timestamp] {
        self.occurrences
    }

    /// Position of this record's timestamp in the host's occurrence list.
    pub fn position(&self) -> Option<usize> {
        self.occurrences
            .iter()
            .position(|dt| *dt == self.occurrence_time)
    }
}
