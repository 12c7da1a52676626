//! In-memory content store.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use storez_core::error::{Error, InvalidInputError};
use storez_core::traits::ContentStore;
use storez_core::{CollectionRegistry, Entry, Item, Result, StoreOptions};

use crate::collection::MemoryCollection;

/// Adapter name of the in-memory backend.
pub const ADAPTER: &str = "memory";

/// A content store whose collections live in process memory.
///
/// Cheap to clone; clones share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    options: StoreOptions,
    registry: CollectionRegistry,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that carries `options` for reporting.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                options,
                registry: CollectionRegistry::new(),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<StoreInner>) -> Self {
        Self { inner }
    }

    /// Load `{collection: {key: entry}}` JSON into [`Entry`] collections.
    ///
    /// Entries are merged with [`MemoryCollection::put`]. Keys are inserted
    /// in the order the JSON object yields them. Returns the number of
    /// entries written.
    ///
    /// # Errors
    ///
    /// Returns an error if `seed` is not shaped as above, or if a named
    /// collection is already registered with another item type.
    #[instrument(skip(self, seed))]
    pub fn seed(&self, seed: &Value) -> Result<usize> {
        let collections = seed.as_object().ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::Other {
                message: "seed must be an object of collections".to_string(),
            })
        })?;

        let mut written = 0;
        for (name, entries) in collections {
            let entries = entries.as_object().ok_or_else(|| {
                Error::InvalidInput(InvalidInputError::Other {
                    message: format!("seed collection '{}' must be an object of entries", name),
                })
            })?;

            let collection = self.col::<Entry>(name)?;
            for (key, entry) in entries {
                collection.put(key, entry)?;
                written += 1;
            }
        }

        debug!(written, "Seeded memory store");
        Ok(written)
    }
}

impl ContentStore for MemoryStore {
    type Collection<T: Item> = MemoryCollection<T>;

    fn adapter(&self) -> &'static str {
        ADAPTER
    }

    fn options(&self) -> &StoreOptions {
        &self.inner.options
    }

    fn registry(&self) -> &CollectionRegistry {
        &self.inner.registry
    }

    fn col<T: Item>(&self, name: &str) -> Result<Arc<MemoryCollection<T>>> {
        let store = Arc::downgrade(&self.inner);
        self.inner
            .registry
            .get_or_insert_with::<T, _, _>(name, || MemoryCollection::new(name, store))
    }
}
