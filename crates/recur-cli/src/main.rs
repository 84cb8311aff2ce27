use clap::Parser;
use owo_colors::{OwoColorize, Style};
use recur_core::error::CoreError;
use tracing::{debug, warn};

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod util;
mod views;

fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    let config = config::Config::new().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load configuration, using defaults");
        config::Config::default()
    });
    debug!(?config, "configuration loaded");

    if let Err(e) = config.validate() {
        handle_error(e.into());
        std::process::exit(1);
    }

    let result = match cli.command {
        cli::Commands::Show(command) => commands::show::show_occurrences(command, &config),
        cli::Commands::Snapshot(command) => commands::snapshot::show_snapshot(command, &config),
        cli::Commands::Fields(command) => commands::fields::show_fields(command, &config),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::Projection {
                occurrence,
                rule,
                source,
            } => {
                eprintln!("{} {}", "Error:".style(error_style), source);
                eprintln!("  occurrence: {}", occurrence.yellow());
                eprintln!("  rule: {}", rule.yellow());
            }
            CoreError::InvalidRRule(s) => {
                eprintln!("{} Invalid RRULE: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidTimezone(tz) => {
                eprintln!(
                    "{} Invalid timezone: '{}'. Use IANA timezone names like 'America/New_York'",
                    "Error:".style(error_style),
                    tz.yellow()
                );
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
