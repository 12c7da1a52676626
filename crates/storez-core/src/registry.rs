//! Per-store cache of collection handles.

use std::any::{Any, type_name};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::data::Item;
use crate::{Error, Result};

struct Registered {
    handle: Arc<dyn Any + Send + Sync>,
    item_type: &'static str,
}

/// Maps collection names to the handles a store has handed out.
///
/// Handles are type-erased so one registry can hold collections of
/// different item types. A name is bound to the item type it was first
/// requested with.
#[derive(Default)]
pub struct CollectionRegistry {
    inner: Mutex<BTreeMap<String, Registered>>,
}

impl CollectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle registered under `name`, creating it with `make` if
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CollectionType`] if `name` is registered with a
    /// different item or collection type.
    pub fn get_or_insert_with<T, C, F>(&self, name: &str, make: F) -> Result<Arc<C>>
    where
        T: Item,
        C: Any + Send + Sync,
        F: FnOnce() -> C,
    {
        let mut map = self.lock();

        if let Some(existing) = map.get(name) {
            return Arc::clone(&existing.handle)
                .downcast::<C>()
                .map_err(|_| Error::CollectionType {
                    name: name.to_string(),
                    expected: existing.item_type.to_string(),
                });
        }

        debug!(collection = name, item_type = type_name::<T>(), "Registering collection");
        let handle = Arc::new(make());
        map.insert(
            name.to_string(),
            Registered {
                handle: Arc::clone(&handle) as Arc<dyn Any + Send + Sync>,
                item_type: type_name::<T>(),
            },
        );

        Ok(handle)
    }

    /// Registered collection names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// A loggable description of each collection, without store references.
    pub fn describe(&self) -> Map<String, Value> {
        self.lock()
            .iter()
            .map(|(name, registered)| {
                (
                    name.clone(),
                    json!({ "name": name, "itemType": registered.item_type }),
                )
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Registered>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CollectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionRegistry")
            .field("collections", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entry;

    #[derive(Debug)]
    struct Handle(&'static str);

    #[derive(Debug)]
    struct OtherHandle;

    #[test]
    fn returns_same_instance() {
        let registry = CollectionRegistry::new();
        let a = registry
            .get_or_insert_with::<Entry, _, _>("posts", || Handle("posts"))
            .unwrap();
        let b = registry
            .get_or_insert_with::<Entry, _, _>("posts", || Handle("other"))
            .unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.0, "posts");
        assert_eq!(registry.names(), vec!["posts".to_string()]);
    }

    #[test]
    fn rejects_type_mismatch() {
        let registry = CollectionRegistry::new();
        registry
            .get_or_insert_with::<Entry, _, _>("posts", || Handle("posts"))
            .unwrap();

        let err = registry
            .get_or_insert_with::<String, _, _>("posts", || OtherHandle)
            .unwrap_err();
        assert!(matches!(err, Error::CollectionType { ref name, .. } if name == "posts"));
    }

    #[test]
    fn describes_without_handles() {
        let registry = CollectionRegistry::new();
        registry
            .get_or_insert_with::<Entry, _, _>("b", || Handle("b"))
            .unwrap();
        registry
            .get_or_insert_with::<Entry, _, _>("a", || Handle("a"))
            .unwrap();

        assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
        let described = registry.describe();
        assert_eq!(described["a"]["name"], "a");
        assert!(described["a"]["itemType"].as_str().unwrap().contains("Map"));
    }
}
