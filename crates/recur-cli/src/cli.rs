use clap::{ArgAction, Parser, Subcommand};

/// Preview the occurrences of a recurrence rule as calendar records
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Project every occurrence of a rule
    Show(ShowCommand),
    /// Show the frozen parameters of a rule
    Snapshot(SnapshotCommand),
    /// Show the calendar fields of a single date
    Fields(FieldsCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct RuleArgs {
    /// The recurrence rule (raw RRULE, optionally with a DTSTART line)
    pub rule: String,
    /// Start of the series, ignored when the rule carries DTSTART
    #[clap(short, long, help = "Series start (e.g., '2024-01-01 09:00', 'tomorrow')")]
    pub start: Option<String>,
    /// Timezone for recurrence
    #[clap(short, long, help = "Timezone for recurrence (IANA format, e.g., 'America/New_York')")]
    pub timezone: Option<String>,
    /// Maximum number of occurrences to expand
    #[clap(long, help = "Maximum number of occurrences to expand")]
    pub limit: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    #[command(flatten)]
    pub rule: RuleArgs,
    /// Host record the occurrences belong to
    #[clap(long, help = "Host record UUID to attach to every occurrence")]
    pub host: Option<String>,
    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SnapshotCommand {
    #[command(flatten)]
    pub rule: RuleArgs,
    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FieldsCommand {
    /// The date to decompose
    pub date: String,
    /// Timezone the date is expressed in
    #[clap(short, long)]
    pub timezone: Option<String>,
    /// Rule whose occurrence list the date is looked up in
    #[clap(long, help = "Recurrence rule to report the date's position in")]
    pub rule: Option<String>,
    /// Start of the series given with --rule
    #[clap(short, long, requires = "rule")]
    pub start: Option<String>,
    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}
