//! CLI argument definitions for the metadata filter host.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "metadata-filter",
    version,
    about = "Normalize metadata fields with per-field filter chains",
    long_about = "Normalize metadata fields such as artist and track names.\n\n\
                  Filters are built from JSON configuration files that map fields\n\
                  to built-in transforms. Without --config a default cleanup\n\
                  chain is applied to artist, track, album and album_artist."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Filter configuration file (JSON). Repeat to combine several files in order.
    #[arg(long = "config", short = 'c', value_name = "PATH", global = true)]
    pub config: Vec<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include metadata values in trace logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter values for one field.
    Apply(ApplyArgs),

    /// List configured fields and their filter chains.
    Fields(FieldsArgs),

    /// List the built-in transforms.
    Transforms,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Field whose filter chain is applied.
    #[arg(long = "field", short = 'f', value_name = "FIELD")]
    pub field: String,

    /// Values to filter. Reads one value per line from stdin when omitted.
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Print one `field: chain` line per field instead of a table.
    #[arg(long = "plain")]
    pub plain: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
