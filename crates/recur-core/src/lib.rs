//! # Recur Core Library
//!
//! Projects RFC 5545 recurrence rules onto concrete, display-ready occurrence
//! records for calendar and content hosts.
//!
//! ## Features
//!
//! - **Occurrence Records**: Each occurrence carries weekday code, day, month
//!   name/number and year, its position in the series and whether it is the
//!   original occurrence
//! - **Rule Snapshots**: Records freeze the rule's parameters (start, until,
//!   frequency, interval, count, occurrences, canonical text) at build time
//! - **Engine Agnostic**: Any engine implementing [`RecurrenceRuleView`] can be
//!   projected; an `rrule`-backed [`engine::RuleEngine`] ships in the box
//! - **Timezone Awareness**: Occurrences are normalized to an IANA timezone
//!   before calendar fields are derived
//!
//! ## Core Modules
//!
//! - [`calendar`]: Calendar field derivation
//! - [`snapshot`]: Rule view trait and snapshot extraction
//! - [`projection`]: Occurrence record assembly
//! - [`engine`]: `rrule` crate adapter
//! - [`models`]: Records, snapshots and identifiers
//! - [`timezone`]: Timezone utilities and validation
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{TimeZone, Utc};
//! use recur_core::{
//!     engine::{EngineConfig, RuleEngine},
//!     projection::OccurrenceProjector,
//!     RecurrenceRuleView,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//!     let rule = RuleEngine::new("FREQ=WEEKLY;COUNT=3", start, "UTC", EngineConfig::default())?;
//!
//!     let projector = OccurrenceProjector::new();
//!     let last = rule.occurrences()[2];
//!     let record = projector.project(last, &rule, None, 2)?;
//!
//!     println!("{} {} {}", record.weekday_code(), record.day_of_month(), record.month_name());
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod engine;
pub mod error;
pub mod models;
pub mod projection;
pub mod snapshot;
pub mod timezone;

pub use calendar::CalendarFields;
pub use error::{CoreError, ProjectionError};
pub use models::{HostRef, MinimalEventRecord, OccurrenceRecord, RuleSnapshot, Timestamp};
pub use projection::OccurrenceProjector;
pub use snapshot::RecurrenceRuleView;
