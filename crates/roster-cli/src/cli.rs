//! CLI argument definitions for the roster tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use roster_model::EntityKind;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Roster ingestion - map, clean and validate client/worker/task spreadsheets",
    long_about = "Ingest client, worker and task spreadsheets (CSV, XLSX, XLS).\n\n\
                  Headers are mapped onto canonical fields, values are coerced and\n\
                  repaired, and the batch is validated across files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow raw cell values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse and validate a batch of files, then print a summary.
    Check(CheckArgs),

    /// Parse one file and write its cleaned entities as CSV.
    Export(ExportArgs),

    /// List canonical fields and recognized header aliases.
    Schema(SchemaArgs),
}

/// Options shared by every command that runs the pipeline.
#[derive(Parser)]
pub struct PipelineArgs {
    /// TOML file with pipeline options (limits, mapping policy, header overrides).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reject files larger than this many bytes.
    #[arg(long = "max-bytes", value_name = "BYTES")]
    pub max_bytes: Option<u64>,

    /// Only apply header mappings that were accepted with high confidence.
    #[arg(long = "accepted-only")]
    pub accepted_only: bool,

    /// Process rows and files on the current thread.
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Keep going when the data has blocking errors.
    #[arg(long = "allow-errors")]
    pub allow_errors: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Input files; the kind is taken from the file name (clients, workers, tasks).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Client file.
    #[arg(long = "clients", value_name = "PATH")]
    pub clients: Option<PathBuf>,

    /// Worker file.
    #[arg(long = "workers", value_name = "PATH")]
    pub workers: Option<PathBuf>,

    /// Task file.
    #[arg(long = "tasks", value_name = "PATH")]
    pub tasks: Option<PathBuf>,

    /// Write the full diagnostics report as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Entity kind of the input file.
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    /// Input file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output CSV path (stdout when omitted).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Map a raw header to a canonical field, e.g. `--map "Cust #=ClientID"`.
    #[arg(long = "map", value_name = "HEADER=FIELD")]
    pub map: Vec<String>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Only show one entity kind.
    #[arg(long = "kind", value_enum)]
    pub kind: Option<KindArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "clients")]
    Client,
    #[value(alias = "workers")]
    Worker,
    #[value(alias = "tasks")]
    Task,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Client => EntityKind::Client,
            KindArg::Worker => EntityKind::Worker,
            KindArg::Task => EntityKind::Task,
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_flags() {
        let cli = Cli::try_parse_from([
            "roster",
            "check",
            "--clients",
            "c.csv",
            "--accepted-only",
            "--json",
            "report.json",
            "-v",
        ])
        .unwrap();
        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.clients, Some(PathBuf::from("c.csv")));
        assert!(args.pipeline.accepted_only);
        assert!(!args.pipeline.sequential);
        assert_eq!(args.json, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn kind_accepts_plural() {
        let cli = Cli::try_parse_from(["roster", "export", "--kind", "tasks", "t.csv"]).unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(EntityKind::from(args.kind), EntityKind::Task);
        assert!(args.map.is_empty());
    }
}
