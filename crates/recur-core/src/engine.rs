use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rrule::{RRuleSet, Tz as RRuleTz};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::models::{RuleParameters, Timestamp};
use crate::snapshot::RecurrenceRuleView;
use crate::timezone::{format_dtstart, parse_timezone};

/// Configuration for rule expansion
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Timezone occurrences are expressed in when none is given (IANA format)
    pub default_timezone: String,
    /// Upper bound on materialized occurrences per rule
    pub max_occurrences: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timezone: "UTC".to_string(),
            max_occurrences: 500,
        }
    }
}

/// RuleEngine: a live recurrence rule backed by the `rrule` crate.
///
/// Occurrences are expanded eagerly on construction and after every edit, so
/// the [`RecurrenceRuleView`] accessors are plain reads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rrule_set: RRuleSet,
    /// Timezone all occurrences are normalized to
    timezone: Tz,
    params: RuleParameters,
    occurrences: Vec<Timestamp>,
    truncated: bool,
    config: EngineConfig,
}

impl RuleEngine {
    /// Creates an engine from a bare rule (`FREQ=...`) and a start time.
    ///
    /// # Arguments
    /// * `rule` - RRULE body, with or without the `RRULE:` prefix
    /// * `dtstart` - Series start in UTC
    /// * `timezone` - IANA timezone the rule is evaluated and reported in
    /// * `config` - Expansion limits
    ///
    /// # Behavior
    /// - Text that already carries a `DTSTART` is parsed as-is
    /// - Otherwise `DTSTART` is rendered in the series timezone so BYDAY and
    ///   friends are evaluated against local wall-clock time
    pub fn new(
        rule: &str,
        dtstart: DateTime<Utc>,
        timezone: &str,
        config: EngineConfig,
    ) -> Result<Self, CoreError> {
        let tz = parse_timezone(timezone)?;

        let rule = rule.trim();
        let text = if rule.contains("DTSTART") {
            rule.to_string()
        } else {
            format!(
                "{}\nRRULE:{}",
                format_dtstart(&dtstart, tz),
                rule.trim_start_matches("RRULE:")
            )
        };

        Self::from_text(&text, tz, config)
    }

    /// Parses complete rule text (`DTSTART` line plus `RRULE` line).
    pub fn parse(text: &str, timezone: &str, config: EngineConfig) -> Result<Self, CoreError> {
        let tz = parse_timezone(timezone)?;
        if !text.contains("DTSTART") {
            return Err(CoreError::InvalidRRule(format!(
                "'{}' has no DTSTART",
                text.trim()
            )));
        }
        Self::from_text(text.trim(), tz, config)
    }

    fn from_text(text: &str, timezone: Tz, config: EngineConfig) -> Result<Self, CoreError> {
        let rrule_set = text
            .parse::<RRuleSet>()
            .map_err(|e| CoreError::InvalidRRule(format!("Failed to parse RRULE '{}': {}", text, e)))?;

        let rules = rrule_set.get_rrule();
        let rule = rules
            .first()
            .ok_or_else(|| CoreError::InvalidRRule(format!("'{}' contains no RRULE", text)))?;
        if rules.len() > 1 {
            debug!(rules = rules.len(), "using first RRULE for rule parameters");
        }

        let params = RuleParameters {
            start: rrule_set.get_dt_start().with_timezone(&timezone),
            explicit_end: rule.get_until().map(|until| until.with_timezone(&timezone)),
            frequency: rule.get_freq().into(),
            interval: u32::from(rule.get_interval()),
        };
        let mut engine = Self {
            rrule_set,
            timezone,
            params,
            occurrences: Vec::new(),
            truncated: false,
            config,
        };
        engine.materialize();
        Ok(engine)
    }

    fn materialize(&mut self) {
        let (dates, limited) = self.rrule_set.clone().all(self.config.max_occurrences);
        if limited {
            warn!(
                limit = self.config.max_occurrences,
                rule = %self.to_canonical_text(),
                "rule expansion truncated at limit"
            );
        }

        self.occurrences = dates
            .into_iter()
            .map(|dt| dt.with_timezone(&self.timezone))
            .collect();
        self.truncated = limited;

        debug!(count = self.occurrences.len(), "materialized occurrences");
    }

    /// Removes one occurrence from the rule (EXDATE) and re-expands it.
    pub fn exclude(&mut self, occurrence: Timestamp) {
        self.rrule_set = self
            .rrule_set
            .clone()
            .exdate(occurrence.with_timezone(&RRuleTz::UTC));
        self.materialize();
    }

    /// Changes the expansion limit and re-expands the rule.
    pub fn set_max_occurrences(&mut self, max_occurrences: u16) {
        self.config.max_occurrences = max_occurrences;
        self.materialize();
    }

    /// Whether the last expansion stopped at the configured limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl RecurrenceRuleView for RuleEngine {
    fn rule_parameters(&self) -> RuleParameters {
        self.params.clone()
    }

    fn occurrences(&self) -> &[Timestamp] {
        &self.occurrences
    }

    /// Renders the whole set: DTSTART in the zone it was parsed in, every
    /// RRULE/EXRULE, then RDATE and EXDATE values in UTC.
    fn to_canonical_text(&self) -> String {
        let set = &self.rrule_set;
        let mut lines = vec![format_set_start(set.get_dt_start())];
        lines.extend(set.get_rrule().iter().map(|rule| format!("RRULE:{}", rule)));
        lines.extend(set.get_exrule().iter().map(|rule| format!("EXRULE:{}", rule)));
        lines.extend(set.get_rdate().iter().map(|dt| format!("RDATE:{}", format_utc(dt))));
        lines.extend(set.get_exdate().iter().map(|dt| format!("EXDATE:{}", format_utc(dt))));
        lines.join("\n")
    }
}

/// DTSTART in its own zone; the rule's BYHOUR values are relative to it.
fn format_set_start(dt_start: &DateTime<RRuleTz>) -> String {
    let local = dt_start.naive_local().format("%Y%m%dT%H%M%S");
    match dt_start.timezone() {
        RRuleTz::Local(_) => format!("DTSTART:{}", local),
        zone if zone.name() == "UTC" => format!("DTSTART:{}Z", local),
        zone => format!("DTSTART;TZID={}:{}", zone.name(), local),
    }
}

fn format_utc(dt: &DateTime<RRuleTz>) -> String {
    dt.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_weekly_rule() {
        let engine =
            RuleEngine::new("FREQ=WEEKLY;COUNT=3", start(), "UTC", EngineConfig::default()).unwrap();

        let params = engine.rule_parameters();
        assert_eq!(params.frequency, Frequency::Weekly);
        assert_eq!(params.interval, 1);
        assert_eq!(params.explicit_end, None);
        assert_eq!(params.start, start().with_timezone(&Tz::UTC));

        let days: Vec<u32> = engine
            .occurrences()
            .iter()
            .map(|dt| chrono::Datelike::day(dt))
            .collect();
        assert_eq!(days, vec![1, 8, 15]);
        assert_eq!(engine.occurrence_count(), 3);
        assert!(!engine.is_truncated());
    }

    #[test]
    fn test_new_accepts_rrule_prefix() {
        let engine =
            RuleEngine::new("RRULE:FREQ=DAILY;COUNT=2", start(), "UTC", EngineConfig::default())
                .unwrap();
        assert_eq!(engine.occurrence_count(), 2);
    }

    #[test]
    fn test_new_invalid_timezone() {
        let result = RuleEngine::new("FREQ=DAILY", start(), "Invalid/Timezone", EngineConfig::default());
        assert!(matches!(result.unwrap_err(), CoreError::InvalidTimezone(_)));
    }

    #[test]
    fn test_new_invalid_rrule() {
        let result = RuleEngine::new("INVALID_RRULE", start(), "UTC", EngineConfig::default());
        assert!(matches!(result.unwrap_err(), CoreError::InvalidRRule(_)));
    }

    #[test]
    fn test_parse_requires_dtstart() {
        let result = RuleEngine::parse("RRULE:FREQ=DAILY", "UTC", EngineConfig::default());
        assert!(matches!(result.unwrap_err(), CoreError::InvalidRRule(_)));
    }

    #[test]
    fn test_until_is_reported_as_explicit_end() {
        let engine = RuleEngine::new(
            "FREQ=DAILY;UNTIL=20240105T090000Z",
            start(),
            "UTC",
            EngineConfig::default(),
        )
        .unwrap();

        let end = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        assert_eq!(engine.rule_parameters().explicit_end, Some(end.with_timezone(&Tz::UTC)));
        assert_eq!(engine.occurrence_count(), 5);
    }

    #[test]
    fn test_infinite_rule_is_truncated() {
        let config = EngineConfig {
            max_occurrences: 10,
            ..EngineConfig::default()
        };
        let engine = RuleEngine::new("FREQ=DAILY", start(), "UTC", config).unwrap();
        assert_eq!(engine.occurrence_count(), 10);
        assert!(engine.is_truncated());
    }

    #[test]
    fn test_set_max_occurrences_reexpands() {
        let mut engine =
            RuleEngine::new("FREQ=DAILY", start(), "UTC", EngineConfig::default()).unwrap();
        engine.set_max_occurrences(4);
        assert_eq!(engine.occurrence_count(), 4);
        assert_eq!(engine.config().max_occurrences, 4);
    }

    #[test]
    fn test_exclude_removes_occurrence() {
        let mut engine =
            RuleEngine::new("FREQ=WEEKLY;COUNT=3", start(), "UTC", EngineConfig::default()).unwrap();
        let second = engine.occurrences()[1];

        engine.exclude(second);

        assert_eq!(engine.occurrence_count(), 2);
        assert!(!engine.occurrences().contains(&second));
        let text = engine.to_canonical_text();
        assert!(text.contains("EXDATE:20240108T090000Z"));

        let reparsed = RuleEngine::parse(&text, "UTC", EngineConfig::default()).unwrap();
        assert_eq!(reparsed.occurrences(), engine.occurrences());
    }

    #[test]
    fn test_occurrences_normalized_to_timezone() {
        let engine = RuleEngine::new(
            "FREQ=DAILY;COUNT=1",
            Utc.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).unwrap(),
            "America/New_York",
            EngineConfig::default(),
        )
        .unwrap();

        let first = engine.occurrences()[0];
        assert_eq!(first.timezone(), chrono_tz::America::New_York);
        assert_eq!(first.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn test_canonical_text_round_trips() {
        let engine = RuleEngine::new(
            "FREQ=WEEKLY;INTERVAL=2;COUNT=4",
            start(),
            "Europe/Berlin",
            EngineConfig::default(),
        )
        .unwrap();

        let text = engine.to_canonical_text();
        assert!(text.starts_with("DTSTART;TZID=Europe/Berlin:"));

        let reparsed = RuleEngine::parse(&text, "Europe/Berlin", EngineConfig::default()).unwrap();
        assert_eq!(reparsed.occurrences(), engine.occurrences());
        assert_eq!(reparsed.rule_parameters(), engine.rule_parameters());
    }

    mod canonical_text {
        use super::*;

        fn round_trip(text: &str, timezone: &str) -> (RuleEngine, RuleEngine) {
            let engine = RuleEngine::parse(text, timezone, EngineConfig::default()).unwrap();
            let reparsed =
                RuleEngine::parse(&engine.to_canonical_text(), timezone, EngineConfig::default())
                    .unwrap();
            (engine, reparsed)
        }

        #[test]
        fn test_rdate_is_kept() {
            let (engine, reparsed) = round_trip(
                "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;COUNT=2\nRDATE:20240110T090000Z",
                "UTC",
            );

            assert_eq!(engine.occurrence_count(), 3);
            assert!(engine.to_canonical_text().contains("RDATE:20240110T090000Z"));
            assert_eq!(reparsed.occurrences(), engine.occurrences());
        }

        #[test]
        fn test_parsed_exdate_is_kept() {
            let (engine, reparsed) = round_trip(
                "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;COUNT=3\nEXDATE:20240108T090000Z",
                "UTC",
            );

            assert_eq!(engine.occurrence_count(), 2);
            assert!(engine.to_canonical_text().contains("EXDATE:20240108T090000Z"));
            assert_eq!(reparsed.occurrences(), engine.occurrences());
        }

        #[test]
        fn test_exclude_adds_to_parsed_exdates() {
            let mut engine = RuleEngine::parse(
                "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;COUNT=4\nEXDATE:20240108T090000Z",
                "UTC",
                EngineConfig::default(),
            )
            .unwrap();
            let last = engine.occurrences()[2];
            engine.exclude(last);

            let text = engine.to_canonical_text();
            assert_eq!(text.matches("EXDATE:").count(), 2);

            let reparsed = RuleEngine::parse(&text, "UTC", EngineConfig::default()).unwrap();
            assert_eq!(reparsed.occurrence_count(), 2);
            assert_eq!(reparsed.occurrences(), engine.occurrences());
        }

        #[test]
        fn test_every_rrule_is_kept() {
            let (engine, reparsed) = round_trip(
                "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;COUNT=2\nRRULE:FREQ=MONTHLY;COUNT=2",
                "UTC",
            );

            assert_eq!(engine.to_canonical_text().matches("RRULE:").count(), 2);
            assert_eq!(reparsed.occurrences(), engine.occurrences());
        }

        #[test]
        fn test_foreign_tzid_is_kept() {
            let (engine, reparsed) = round_trip(
                "DTSTART;TZID=America/New_York:20240101T090000\nRRULE:FREQ=DAILY;COUNT=2",
                "UTC",
            );

            let expected: Vec<Timestamp> = [1, 2]
                .iter()
                .map(|d| {
                    Utc.with_ymd_and_hms(2024, 1, *d, 14, 0, 0)
                        .unwrap()
                        .with_timezone(&Tz::UTC)
                })
                .collect();
            assert_eq!(engine.occurrences(), expected.as_slice());
            assert!(engine
                .to_canonical_text()
                .starts_with("DTSTART;TZID=America/New_York:20240101T090000\n"));
            assert_eq!(reparsed.occurrences(), engine.occurrences());
            assert_eq!(reparsed.rule_parameters(), engine.rule_parameters());
        }
    }
}
