// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI entry point: wires the loader, the core scheduling engine, the real
//! child-process adapter and the status printer together into the tick loop.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dispatcher_core::{Dispatcher, DispatcherConfig, TickOutcome};
use dispatcher_os::UnixChildProcessAdapter;
use tracing::info;

/// Simulated host dispatcher: admission, memory/resource allocation and MLFQ
/// scheduling over real child processes.
#[derive(Debug, Parser)]
#[command(name = "dispatcher", version, about)]
struct Cli {
    /// Path to the batch file of process descriptors.
    input_file: PathBuf,

    /// Optional TOML file overriding the system's capacity constants.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wall-clock milliseconds paced at the end of every tick.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    tick_ms: u64,

    /// Suppress the per-tick status table; only the final summary is printed.
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .init();

    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DispatcherConfig::default();
    if let Some(path) = &cli.config {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file '{}'", path.display()))?;
        config = DispatcherConfig::from_toml_str(&text)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }
    config.tick_millis = cli.tick_ms;

    let mut disp = Dispatcher::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    dispatcher_io::print_help(&mut out)?;
    writeln!(out)?;

    let loaded = dispatcher_io::load(&cli.input_file, &mut disp)
        .with_context(|| format!("unable to open input file '{}'", cli.input_file.display()))?;
    info!(loaded, "parsed input file");

    if !cli.quiet {
        dispatcher_io::print_status(&disp, &mut out)?;
    }

    let mut adapter = UnixChildProcessAdapter::new();
    loop {
        let outcome = dispatcher_core::tick(&mut disp, &mut adapter);
        if !cli.quiet {
            dispatcher_io::print_status(&disp, &mut out)?;
        }
        if outcome == TickOutcome::Finished {
            break;
        }
        sleep(Duration::from_millis(disp.config.tick_millis));
    }

    dispatcher_io::print_finished(disp.clock, &mut out)?;
    Ok(())
}
