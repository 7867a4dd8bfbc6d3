//! Entry point for the `slidectl` binary.

mod cli;
mod error;
mod script;

use std::{fs, io, path::Path, process};

use clap::Parser;
use slider_config::{OptionsRegistry, RawOptions};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands, OptionsArgs, RunArgs},
    error::{Error, Result},
    script::Script,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    let env_filter = logging::env_filter_from_spec(&log.spec());
    registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).without_time())
        .try_init()
        .ok();

    match command {
        Commands::Run(args) => run_script(&args),
        Commands::Options(args) => print_options(&args),
    }
}

/// Read a file into a string, naming the path on failure.
fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `--options` into the process-wide registry.
fn load_global_options(path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        let raw = RawOptions::from_ron(&read(path)?)?;
        OptionsRegistry::global().options(raw);
    }
    Ok(())
}

fn run_script(args: &RunArgs) -> Result<()> {
    load_global_options(args.options.as_deref())?;
    let script = Script::from_ron(&read(&args.script)?)?;
    let transcript = script.play(OptionsRegistry::global())?;
    for entry in &transcript.entries {
        if args.json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("[{}] {:?}", entry.step, entry.msg);
        }
    }
    if args.json {
        println!("{}", serde_json::to_string(&transcript.value)?);
    } else {
        println!("final: {:?}", transcript.value);
    }
    Ok(())
}

fn print_options(args: &OptionsArgs) -> Result<()> {
    load_global_options(args.options.as_deref())?;
    let opts = OptionsRegistry::global().resolve(None)?;
    println!("{}", opts.to_ron());
    Ok(())
}
