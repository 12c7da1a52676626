//! storez - CLI tool for reading content stores.
//!
//! This is a thin wrapper over the `storez` library, intended for poking at
//! a Cockpit instance or a seeded memory store from the shell.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    commands::handle(cli.command, &cli.store).await
}

/// Log targets raised by `-v`; everything else stays at warn until `-vvv`.
const LOG_TARGETS: &[&str] = &["storez", "storez_core", "storez_memory", "storez_cockpit"];

fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => return "trace".to_string(),
    };

    let targets: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect();
    format!("warn,{}", targets.join(","))
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let layer = fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.with_target(verbosity >= 2)).init();
    }
}
