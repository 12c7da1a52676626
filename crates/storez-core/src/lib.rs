//! storez-core - Core types and traits for content stores.
//!
//! A [`ContentStore`] hands out named [`Collection`]s of typed items. Each
//! collection can [`fetch`](Collection::fetch) a full snapshot with field
//! metadata, or [`fetch_entries`](Collection::fetch_entries) filtered by a
//! data-only query [`Expression`].
//!
//! Backends live in their own crates.

pub mod data;
pub mod error;
pub mod options;
pub mod query;
pub mod registry;
pub mod traits;
pub mod types;

pub use data::{
    ChangeResult, CollectionData, Entry, FieldData, Item, RetrievalInfo, RetrievalResult,
};
pub use error::Error;
pub use options::StoreOptions;
pub use query::{Expression, matches};
pub use registry::CollectionRegistry;
pub use traits::{Collection, ContentStore, filter_entries};
pub use types::ApiBaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
