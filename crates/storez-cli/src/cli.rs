//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::commands::Commands;

/// Read collections from a content store.
#[derive(Parser, Debug)]
#[command(name = "storez")]
#[command(author, version = env!("STOREZ_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which store to open and how.
#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// Store adapter (memory, cockpit)
    #[arg(long, env = "STOREZ_ADAPTER", global = true)]
    pub adapter: Option<String>,

    /// Store URI, e.g. cockpit:https://cms.example.com
    #[arg(long, env = "STOREZ_URI", global = true)]
    pub uri: Option<String>,

    /// Cockpit API token
    #[arg(long, env = "COCKPIT_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Cockpit base URL
    #[arg(long, env = "COCKPIT_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// JSON file of {collection: {key: entry}} to load (memory only)
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Store config file (defaults to <config dir>/storez/store.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}
