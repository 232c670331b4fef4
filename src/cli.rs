//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI parser for `ogrinfo-report`.
#[derive(Debug, Parser)]
#[command(
    name = "ogrinfo-report",
    version,
    about = "Capture ogrinfo layer information as an HTML report"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Parameters shared by commands that build an `ogrinfo` invocation.
#[derive(Debug, Clone, Args)]
pub struct LayerArgs {
    /// Input layer: a file path, `path|layername=...`, or a PostgreSQL URI.
    #[arg(long, short = 'i')]
    pub input: String,

    /// Only list a summary of each layer (`-so`).
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        value_name = "BOOL"
    )]
    pub summary_only: bool,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run ogrinfo and write its output as an HTML report.
    Run {
        /// Layer selection.
        #[command(flatten)]
        layer: LayerArgs,

        /// Path of the HTML report to write.
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
    /// Print the ogrinfo command line without running it.
    Command {
        /// Layer selection.
        #[command(flatten)]
        layer: LayerArgs,
    },
    /// Print the declared parameters and outputs.
    Describe,
}
