//! Entries command implementation.

use anyhow::{Context, Result};
use clap::Args;

use storez::{Collection, ContentStore, Entry, Expression};

use crate::cli::StoreArgs;
use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct EntriesArgs {
    /// Collection name
    pub collection: String,

    /// Filter as a JSON query expression, e.g. '{"featured": true}'
    #[arg(long, short)]
    pub query: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: EntriesArgs, store_args: &StoreArgs) -> Result<()> {
    let query = args
        .query
        .as_deref()
        .map(str::parse::<Expression>)
        .transpose()
        .context("Invalid query")?;

    let store = config::open_store(store_args)?;
    let collection = store
        .col::<Entry>(&args.collection)
        .context("Failed to open collection")?;

    let entries = collection
        .fetch_entries(query.as_ref())
        .await
        .context("Failed to fetch entries")?;

    if entries.is_empty() {
        output::note("No entries found.");
        return Ok(());
    }

    for entry in &entries {
        output::json_as(entry, args.pretty)?;
    }

    Ok(())
}
