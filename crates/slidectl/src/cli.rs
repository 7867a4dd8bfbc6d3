//! Command-line interface definitions for slidectl.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `slidectl` binary.
#[derive(Parser, Debug)]
#[command(
    name = "slidectl",
    about = "Drive a slider control from a scripted session",
    version
)]
pub struct Cli {
    /// Logging controls shared across slider binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Which command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a RON script of interaction steps and print every emitted message.
    Run(RunArgs),
    /// Print the resolved options as RON.
    Options(OptionsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the session script (RON).
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Global options layer (RON) applied before the script's own overrides.
    #[arg(long, value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Print messages as JSON lines instead of debug text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `options` subcommand.
#[derive(Args, Debug, Clone)]
pub struct OptionsArgs {
    /// Global options layer (RON) to resolve against the defaults.
    #[arg(long, value_name = "PATH")]
    pub options: Option<PathBuf>,
}
