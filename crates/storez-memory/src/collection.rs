//! In-memory collection.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard, PoisonError, Weak};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use storez_core::error::{Error, InvalidInputError};
use storez_core::traits::Collection;
use storez_core::{ChangeResult, CollectionData, FieldData, Item, Result, RetrievalResult};

use crate::store::{MemoryStore, StoreInner};

/// A collection held entirely in process memory.
///
/// Entries are kept in insertion order under string keys. Nothing is
/// persisted.
pub struct MemoryCollection<T> {
    name: String,
    store: Weak<StoreInner>,
    state: RwLock<State<T>>,
}

struct State<T> {
    entries: Vec<(String, T)>,
    schema: Option<Vec<FieldData>>,
}

impl<T: Item> MemoryCollection<T> {
    pub(crate) fn new(name: &str, store: Weak<StoreInner>) -> Self {
        Self {
            name: name.to_string(),
            store,
            state: RwLock::new(State {
                entries: Vec::new(),
                schema: None,
            }),
        }
    }

    /// Returns the store this collection belongs to, if it is still alive.
    pub fn store(&self) -> Option<MemoryStore> {
        self.store.upgrade().map(MemoryStore::from_inner)
    }

    /// Merge `patch` over the entry at `key`.
    ///
    /// Fields of the existing entry survive unless `patch` sets them.
    /// Returns the before/after pair, or `None` if the merged entry is equal
    /// to the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Entry`] if `patch` is not a JSON object
    /// or the merged entry does not decode as `T`. The collection is left
    /// unchanged.
    #[instrument(skip(self, patch), fields(collection = %self.name))]
    pub fn put(&self, key: &str, patch: impl Serialize) -> Result<Option<ChangeResult<T>>> {
        let patch = match serde_json::to_value(patch) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(entry_error(key, "patch must be a JSON object")),
            Err(e) => return Err(entry_error(key, e.to_string())),
        };

        let mut state = self.write();
        let position = state.entries.iter().position(|(k, _)| k == key);
        let initial = position.map(|i| state.entries[i].1.clone());

        let previous = match &initial {
            Some(entry) => Some(to_object(key, entry)?),
            None => None,
        };

        let mut merged = previous.clone().unwrap_or_default();
        merged.extend(patch);

        let new: T = serde_json::from_value(Value::Object(merged))
            .map_err(|e| entry_error(key, e.to_string()))?;

        // Compare what T keeps, not the raw merge.
        if let Some(previous) = &previous
            && *previous == to_object(key, &new)?
        {
            debug!(key, "Entry unchanged");
            return Ok(None);
        }

        match position {
            Some(i) => state.entries[i].1 = new.clone(),
            None => state.entries.push((key.to_string(), new.clone())),
        }

        debug!(key, created = initial.is_none(), "Entry stored");
        Ok(Some(ChangeResult { initial, new }))
    }

    /// Returns a copy of the entry at `key`.
    pub fn get(&self, key: &str) -> Option<T> {
        self.read()
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Removes and returns the entry at `key`.
    pub fn remove(&self, key: &str) -> Option<T> {
        let mut state = self.write();
        let position = state.entries.iter().position(|(k, _)| k == key)?;
        Some(state.entries.remove(position).1)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.read().entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Set an explicit schema, reported by `fetch` instead of derived fields.
    pub fn define_fields(&self, fields: Vec<FieldData>) {
        self.write().schema = Some(fields);
    }

    fn snapshot(&self) -> Result<CollectionData<T>> {
        let state = self.read();
        let entries: Vec<T> = state.entries.iter().map(|(_, v)| v.clone()).collect();

        let fields = match &state.schema {
            Some(schema) => schema.clone(),
            None => derive_fields(&state.entries)?,
        };

        Ok(CollectionData::new(fields, entries))
    }

    fn read(&self) -> RwLockReadGuard<'_, State<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<T: Item> Collection<T> for MemoryCollection<T> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    async fn fetch(&self) -> RetrievalResult<T> {
        match self.snapshot() {
            Ok(data) => RetrievalResult::success(&self.name, data),
            Err(e) => RetrievalResult::failure(&self.name, e.to_string()),
        }
    }
}

impl<T> std::fmt::Debug for MemoryCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCollection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Fields are the union of the entries' top-level keys, in first-seen
/// order, typed by the JSON kind of the first value seen.
fn derive_fields<T: Item>(entries: &[(String, T)]) -> Result<Vec<FieldData>> {
    let mut fields: Vec<FieldData> = Vec::new();

    for (key, entry) in entries {
        for (name, value) in to_object(key, entry)? {
            if !fields.iter().any(|f| f.name == name) {
                let kind = FieldData::kind_of(&value);
                fields.push(FieldData::new(name, kind));
            }
        }
    }

    Ok(fields)
}

fn to_object<T: Item>(key: &str, entry: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(entry) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(entry_error(key, "entries must serialize as JSON objects")),
        Err(e) => Err(entry_error(key, e.to_string())),
    }
}

fn entry_error(key: &str, reason: impl Into<String>) -> Error {
    Error::InvalidInput(InvalidInputError::Entry {
        key: key.to_string(),
        reason: reason.into(),
    })
}
