//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Student roster analytics - clean, deduplicate and summarize track sheets",
    long_about = "Merge one CSV sheet per track into a single roster, clean and impute\n\
                  values, drop duplicate students and report per-track, per-cohort\n\
                  and per-income statistics."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a workbook directory and write the summary report.
    Report(ReportArgs),

    /// List the columns a sheet may carry.
    Fields,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Directory with one CSV file per track; the file stem is the track name.
    #[arg(value_name = "WORKBOOK_DIR")]
    pub workbook_dir: PathBuf,

    /// Output directory for generated files (default: <WORKBOOK_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Clean and summarize without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first N cleaned rows.
    #[arg(long = "preview", value_name = "N", default_value_t = 0)]
    pub preview: usize,
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
