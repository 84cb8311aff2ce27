use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use recur_core::engine::RuleEngine;
use recur_core::error::CoreError;
use recur_core::models::HostRef;
use recur_core::timezone::parse_timezone;

use crate::cli::RuleArgs;
use crate::config::Config;
use crate::parser::parse_date;

/// Timezone from the command line, falling back to the configured default.
pub fn resolve_timezone(flag: Option<&str>, config: &Config) -> Result<Tz> {
    let name = flag.unwrap_or(config.engine.default_timezone.as_str());
    Ok(parse_timezone(name)?)
}

/// Builds a live rule from command-line arguments.
pub fn build_engine(args: &RuleArgs, config: &Config) -> Result<RuleEngine> {
    let timezone = resolve_timezone(args.timezone.as_deref(), config)?;

    let mut engine_config = config.engine.clone();
    if let Some(limit) = args.limit {
        engine_config.max_occurrences = limit;
    }

    let dtstart = match &args.start {
        Some(start) => parse_date(start, timezone)?,
        None => Utc::now(),
    };

    let engine = RuleEngine::new(&args.rule, dtstart, timezone.name(), engine_config)?;
    Ok(engine)
}

pub fn parse_host_ref(raw: &str) -> Result<HostRef> {
    raw.parse::<HostRef>().map_err(|_| {
        anyhow::anyhow!(CoreError::InvalidInput(format!(
            "'{}' is not a valid host record UUID",
            raw
        )))
    })
}
