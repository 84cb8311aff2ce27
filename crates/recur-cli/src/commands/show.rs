use anyhow::Result;
use owo_colors::OwoColorize;
use recur_core::OccurrenceProjector;
use tracing::info;

use crate::cli::ShowCommand;
use crate::config::Config;
use crate::util::{build_engine, parse_host_ref};
use crate::views::table::display_occurrences;

pub fn show_occurrences(command: ShowCommand, config: &Config) -> Result<()> {
    let engine = build_engine(&command.rule, config)?;
    let host_ref = command.host.as_deref().map(parse_host_ref).transpose()?;

    let records = OccurrenceProjector::new().project_all(&engine, host_ref)?;
    info!(count = records.len(), "projected occurrences");

    if command.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        display_occurrences(&records, &config.output.date_format);
    }

    if engine.is_truncated() {
        eprintln!(
            "{} Showing the first {} occurrences; raise --limit to see more.",
            "Note:".yellow().bold(),
            records.len()
        );
    }

    Ok(())
}
