//! Fetch command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use storez::{Collection, ContentStore, Entry};

use crate::cli::StoreArgs;
use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Collection name
    pub collection: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: FetchArgs, store_args: &StoreArgs) -> Result<()> {
    let store = config::open_store(store_args)?;
    let collection = store
        .col::<Entry>(&args.collection)
        .context("Failed to open collection")?;

    let result = collection.fetch().await;
    output::json_as(&result, args.pretty)?;

    if !result.status {
        bail!("Fetch of '{}' failed: {}", args.collection, result.message);
    }

    Ok(())
}
