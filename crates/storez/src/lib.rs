//! storez - Content stores with pluggable backends.
//!
//! A [`ContentStore`] hands out named [`Collection`]s. This crate ties the
//! backends together: [`load_store`] picks one by adapter name or URI
//! scheme and returns it as an [`AnyStore`].
//!
//! # Example
//!
//! ```no_run
//! use storez::{Collection, ContentStore, Entry, Expression, LoadOptions, load_store};
//!
//! # async fn example() -> Result<(), storez::Error> {
//! let mut opts = LoadOptions::default();
//! opts.uri = Some("cockpit:https://cms.example.com".to_string());
//! opts.options.insert("apiToken".to_string(), "my-token".to_string());
//!
//! let store = load_store(Some(&opts))?;
//! let projects = store.col::<Entry>("project")?;
//!
//! let featured: Expression = r#"{"featured": true}"#.parse()?;
//! for entry in projects.fetch_entries(Some(&featured)).await? {
//!     println!("{}", serde_json::Value::Object(entry));
//! }
//! # Ok(())
//! # }
//! ```

mod any;
mod loader;

pub use any::AnyStore;
pub use loader::{ADAPTER_KEY, Adapter, LoadOptions, URI_KEY, load_store};

pub use storez_cockpit as cockpit;
pub use storez_cockpit::{CockpitCollection, CockpitOptions, CockpitStore};
pub use storez_core::{
    ApiBaseUrl, ChangeResult, Collection, CollectionData, ContentStore, Entry, Error, Expression,
    FieldData, Item, Result, RetrievalResult, StoreOptions, error, matches,
};
pub use storez_memory as memory;
pub use storez_memory::{MemoryCollection, MemoryStore};
