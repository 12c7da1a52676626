//! Content store trait.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::data::Item;
use crate::options::{StoreOptions, redact_options};
use crate::registry::CollectionRegistry;
use crate::Result;

use super::Collection;

/// A backend that hands out named collections.
pub trait ContentStore: Send + Sync {
    /// Collection handle type for this backend.
    type Collection<T: Item>: Collection<T> + ?Sized;

    /// Returns the adapter name of this backend (`"memory"`, `"cockpit"`).
    fn adapter(&self) -> &'static str;

    /// Returns the raw backend configuration.
    ///
    /// May contain credentials. Use [`to_json`](Self::to_json) for logging.
    fn options(&self) -> &StoreOptions;

    /// Returns the registry of collections handed out so far.
    fn registry(&self) -> &CollectionRegistry;

    /// Get or create the collection named `name`.
    ///
    /// Repeated calls with the same name and item type return the same
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CollectionType`](crate::Error::CollectionType) if
    /// `name` was first requested with a different item type.
    fn col<T: Item>(&self, name: &str) -> Result<Arc<Self::Collection<T>>>;

    /// Names of the collections handed out so far, sorted.
    fn collection_names(&self) -> Vec<String> {
        self.registry().names()
    }

    /// A loggable snapshot of this store with credentials redacted.
    fn to_json(&self) -> Value {
        json!({
            "adapter": self.adapter(),
            "collections": self.registry().describe(),
            "options": redact_options(self.options()),
        })
    }
}
