use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gnv_report::HistoryFormat;

#[derive(Parser)]
#[command(
    name = "gnv",
    about = "gNMI / CLI state verification: compare telemetry with command output",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./gnv.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Telemetry JSON document keyed by gNMI path
    #[arg(long, global = true)]
    pub telemetry: Option<PathBuf>,

    /// Path/command catalogue in TOML (defaults to the built-in catalogue)
    #[arg(long, global = true)]
    pub catalogue: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify one gNMI path
    Compare(CompareArgs),
    /// Compare a telemetry JSON file with a `key: value` output file
    Diff(DiffArgs),
    /// List paths present in both telemetry and the catalogue
    Paths(PathsArgs),
    /// Interactive prompt (the default)
    Shell(ShellArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    pub path: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub telemetry_file: PathBuf,
    pub command_output: PathBuf,
}

#[derive(Args)]
pub struct PathsArgs {
    /// Include paths known to only one source
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Default)]
pub struct ShellArgs {
    /// Save history here on exit instead of asking (extension is added)
    #[arg(long)]
    pub history: Option<PathBuf>,
    #[arg(long)]
    pub history_format: Option<HistoryFormat>,
}
