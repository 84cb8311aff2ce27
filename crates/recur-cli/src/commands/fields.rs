use anyhow::Result;
use recur_core::timezone::{get_timezone_abbreviation, to_local};
use recur_core::{MinimalEventRecord, RecurrenceRuleView};

use crate::cli::{FieldsCommand, RuleArgs};
use crate::config::Config;
use crate::parser::parse_date;
use crate::util::{build_engine, resolve_timezone};
use crate::views::table::display_fields;

pub fn show_fields(command: FieldsCommand, config: &Config) -> Result<()> {
    let timezone = resolve_timezone(command.timezone.as_deref(), config)?;
    let instant = parse_date(&command.date, timezone)?;
    let local = to_local(instant, timezone);

    // Without a rule there is no series to place the date in.
    let engine = match &command.rule {
        Some(rule) => {
            let args = RuleArgs {
                rule: rule.clone(),
                start: command.start.clone(),
                timezone: Some(timezone.name().to_string()),
                limit: None,
            };
            Some(build_engine(&args, config)?)
        }
        None => None,
    };
    let occurrences = engine.as_ref().map_or(&[][..], |engine| engine.occurrences());

    let record = MinimalEventRecord::build(local, None, occurrences)?;

    if command.json {
        let mut value = serde_json::to_value(&record)?;
        value["position"] = serde_json::json!(record.position());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let abbreviation = get_timezone_abbreviation(timezone.name(), instant)?;
        display_fields(&record, &abbreviation);
    }

    Ok(())
}
