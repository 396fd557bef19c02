//! Command-line arguments for `csvbind`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csvbind",
    version,
    about = "Map CSV files onto declared models and validate the records",
    long_about = "Map the rows of a CSV file onto a model declared in TOML, \
                  convert every bound cell to its field type, and check each \
                  record against the field rules.\n\n\
                  Conversion and validation problems are reported per line and \
                  per record; processing never stops at the first problem."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include source cell values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map a CSV file onto a model and validate every record.
    Check(CheckArgs),

    /// Write a demo users.csv and its model declaration.
    Sample(SampleArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV file to read; the first line is the header.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Model declaration (TOML) describing fields, columns and rules.
    #[arg(long = "model", short = 'm', value_name = "MODEL")]
    pub model: PathBuf,

    /// How to print the report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Directory to write users.csv and users.toml into.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Replace existing files.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
