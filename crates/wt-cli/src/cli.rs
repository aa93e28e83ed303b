//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Browsing-time analyzer.
///
/// Turns a browsing-history export into "time spent" statistics per domain,
/// optionally broken down by subdomain and calendar month.
#[derive(Debug, Parser)]
#[command(name = "wt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the history export; overrides the configured default.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Time spent per domain, with optional filters and month breakdown.
    Report {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// The same report for one randomly picked domain.
    Random {
        /// Break totals down by calendar month.
        #[arg(long)]
        include_month: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Full-detail export: every host, bucketed by month.
    Export {
        /// Output format.
        #[arg(long = "export", value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Destination file; a random name is generated when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Query arguments shared by report-style commands.
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Restrict to these registrable domains (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub domains: Vec<String>,

    /// Restrict to these full hosts (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub hosts: Vec<String>,

    /// Grouping granularity.
    #[arg(long, value_enum, default_value = "domain")]
    pub groupby: GroupbyMode,

    /// Break totals down by calendar month.
    #[arg(long)]
    pub include_month: bool,

    /// Inclusive lower bound on visit dates (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    pub date_start: Option<String>,

    /// Inclusive upper bound on visit dates (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    pub date_end: Option<String>,
}

/// Domain granularity on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupbyMode {
    /// Registrable domain (`google.com`).
    Domain,
    /// Full subdomain-qualified host (`mail.google.com`).
    Subdomain,
}

/// Output destination arguments.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long = "export", value_enum, default_value = "console")]
    pub format: ExportFormat,

    /// Destination file; a random name is generated when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Aligned table on stdout.
    Console,
    /// Comma-separated values with a header row.
    Csv,
    /// Tab-separated values with a header row.
    Tsv,
}
