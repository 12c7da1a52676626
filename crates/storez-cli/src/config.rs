//! Store configuration: config file, then environment and flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use storez::{AnyStore, LoadOptions, cockpit, load_store};

use crate::cli::StoreArgs;

/// Name of the config file inside the platform config directory.
const CONFIG_FILE: &str = "store.json";

/// Default config file path, if the platform has a config directory.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "storez").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn read_config(path: &Path) -> Result<LoadOptions> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Options given on the command line or through the environment.
fn from_args(args: &StoreArgs) -> LoadOptions {
    let mut opts = LoadOptions {
        adapter: args.adapter.clone(),
        uri: args.uri.clone(),
        ..Default::default()
    };
    if let Some(token) = &args.api_token {
        opts.options
            .insert(cockpit::API_TOKEN.to_string(), token.clone());
    }
    if let Some(base) = &args.api_base_url {
        opts.options
            .insert(cockpit::API_BASE_URL.to_string(), base.clone());
    }
    opts
}

/// Resolve the load options: an explicit `--config` must exist, the default
/// file is read only when present. Flags and environment win.
pub fn load_options(args: &StoreArgs) -> Result<LoadOptions> {
    let mut opts = match &args.config {
        Some(path) => read_config(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "Using default config file");
                read_config(&path)?
            }
            _ => LoadOptions::default(),
        },
    };

    opts.overlay(from_args(args));
    Ok(opts)
}

/// Open the store described by `args`, seeding it when asked.
pub fn open_store(args: &StoreArgs) -> Result<AnyStore> {
    let opts = load_options(args)?;
    let store = load_store(Some(&opts)).context("Failed to load store")?;

    if let Some(path) = &args.seed {
        let memory = store
            .as_memory()
            .context("--seed is only supported by the memory adapter")?;
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: serde_json::Value = serde_json::from_str(&json)
            .with_context(|| format!("Invalid seed file {}", path.display()))?;
        let written = memory.seed(&seed).context("Failed to seed store")?;
        debug!(written, "Seeded store");
    }

    Ok(store)
}
