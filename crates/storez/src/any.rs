//! A store whose backend is chosen at runtime.

use std::sync::Arc;

use storez_cockpit::CockpitStore;
use storez_core::traits::{Collection, ContentStore};
use storez_core::{CollectionRegistry, Item, Result, StoreOptions};
use storez_memory::MemoryStore;

use crate::loader::Adapter;

/// One of the registered backends.
///
/// Collections come back as `dyn Collection<T>` handles. They are the same
/// `Arc`s the wrapped store caches, so identity is preserved.
#[derive(Debug, Clone)]
pub enum AnyStore {
    Memory(MemoryStore),
    Cockpit(CockpitStore),
}

impl AnyStore {
    /// Which backend this is.
    pub fn kind(&self) -> Adapter {
        match self {
            AnyStore::Memory(_) => Adapter::Memory,
            AnyStore::Cockpit(_) => Adapter::Cockpit,
        }
    }

    /// Returns the memory store, if that is the backend.
    pub fn as_memory(&self) -> Option<&MemoryStore> {
        match self {
            AnyStore::Memory(store) => Some(store),
            _ => None,
        }
    }

    /// Returns the Cockpit store, if that is the backend.
    pub fn as_cockpit(&self) -> Option<&CockpitStore> {
        match self {
            AnyStore::Cockpit(store) => Some(store),
            _ => None,
        }
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(store: MemoryStore) -> Self {
        AnyStore::Memory(store)
    }
}

impl From<CockpitStore> for AnyStore {
    fn from(store: CockpitStore) -> Self {
        AnyStore::Cockpit(store)
    }
}

impl ContentStore for AnyStore {
    type Collection<T: Item> = dyn Collection<T>;

    fn adapter(&self) -> &'static str {
        match self {
            AnyStore::Memory(store) => store.adapter(),
            AnyStore::Cockpit(store) => store.adapter(),
        }
    }

    fn options(&self) -> &StoreOptions {
        match self {
            AnyStore::Memory(store) => store.options(),
            AnyStore::Cockpit(store) => store.options(),
        }
    }

    fn registry(&self) -> &CollectionRegistry {
        match self {
            AnyStore::Memory(store) => store.registry(),
            AnyStore::Cockpit(store) => store.registry(),
        }
    }

    fn col<T: Item>(&self, name: &str) -> Result<Arc<dyn Collection<T>>> {
        let collection: Arc<dyn Collection<T>> = match self {
            AnyStore::Memory(store) => store.col::<T>(name)?,
            AnyStore::Cockpit(store) => store.col::<T>(name)?,
        };
        Ok(collection)
    }
}
