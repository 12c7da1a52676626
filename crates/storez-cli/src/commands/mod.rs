//! Subcommand implementations.

mod describe;
mod entries;
mod fetch;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::StoreArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a collection and print the retrieval result
    Fetch(fetch::FetchArgs),

    /// Print the entries of a collection, one per line
    Entries(entries::EntriesArgs),

    /// Describe the store with credentials redacted
    Describe(describe::DescribeArgs),
}

pub async fn handle(cmd: Commands, store: &StoreArgs) -> Result<()> {
    match cmd {
        Commands::Fetch(args) => fetch::run(args, store).await,
        Commands::Entries(args) => entries::run(args, store).await,
        Commands::Describe(args) => describe::run(args, store).await,
    }
}
