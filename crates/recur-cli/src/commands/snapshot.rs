use anyhow::Result;
use recur_core::{CoreError, RecurrenceRuleView, RuleSnapshot};

use crate::cli::SnapshotCommand;
use crate::config::Config;
use crate::util::build_engine;
use crate::views::table::display_snapshot;

pub fn show_snapshot(command: SnapshotCommand, config: &Config) -> Result<()> {
    let engine = build_engine(&command.rule, config)?;
    let snapshot = RuleSnapshot::extract(&engine).map_err(|source| CoreError::Projection {
        occurrence: engine.rule_parameters().start.to_rfc3339(),
        rule: engine.to_canonical_text(),
        source,
    })?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        display_snapshot(&snapshot, &config.output.date_format);
    }

    Ok(())
}
