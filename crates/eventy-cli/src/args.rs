use crate::types::{ColorMode, LogLevel};
use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  eventy                          List logs with entries
  eventy Application              Newest 10 entries of Application
  eventy Application -m -r        Every entry, oldest first
  eventy System -l error -f 2024-03-01
  eventy Security 123456          Show record 123456 of Security
  eventy 123456                   Find record 123456 in every log
  eventy Application -s spooler -x entries.json";

#[derive(Parser, Debug)]
#[command(name = "eventy")]
#[command(about = "Query, filter and export structured event logs", long_about = None)]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Log to query; omit to list logs. A lone number is a record id.
    pub log_name: Option<String>,

    /// Record id to show
    pub record_id: Option<String>,

    /// Max entries to list. Omit the value, or pass 0, for all.
    #[arg(
        short = 'm',
        long = "max",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "0",
        allow_negative_numbers = true
    )]
    pub max: Option<String>,

    /// Read oldest to newest
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,

    /// Entries created at or after this time (YYYY-MM-DD [HH:MM:SS], local)
    #[arg(short = 'f', long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Entries created at or before this time (YYYY-MM-DD [HH:MM:SS], local)
    #[arg(short = 't', long = "to", value_name = "DATE")]
    pub to: Option<String>,

    /// Level to keep: crit, error, warn, info, verbose or a number. Repeatable.
    #[arg(short = 'l', long = "level", value_name = "LEVEL")]
    pub levels: Vec<String>,

    /// Text to search for. Repeatable.
    #[arg(short = 's', long = "search", value_name = "TERM")]
    pub search: Vec<String>,

    /// Require every search term to match instead of any
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Write the result as JSON to this file
    #[arg(short = 'x', long = "export", value_name = "PATH")]
    pub export: Option<String>,

    /// Data directory holding config.toml
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Directory holding the journal logs
    #[arg(long, value_name = "PATH")]
    pub log_root: Option<String>,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    #[arg(long, default_value = "auto")]
    pub color: ColorMode,
}
