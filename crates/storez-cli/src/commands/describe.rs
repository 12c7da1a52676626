//! Describe command implementation.

use anyhow::{Context, Result};
use clap::Args;

use storez::{ContentStore, Entry};

use crate::cli::StoreArgs;
use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Collections to open before describing
    pub collections: Vec<String>,
}

pub async fn run(args: DescribeArgs, store_args: &StoreArgs) -> Result<()> {
    let store = config::open_store(store_args)?;

    for name in &args.collections {
        store
            .col::<Entry>(name)
            .with_context(|| format!("Failed to open collection '{}'", name))?;
    }

    output::json_pretty(&store.to_json())
}
