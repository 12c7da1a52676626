//! Collection trait.

use async_trait::async_trait;
use tracing::warn;

use crate::data::{Item, RetrievalResult};
use crate::error::{Error, InvalidInputError};
use crate::query::Expression;
use crate::Result;

/// A named, typed view over the entries of one collection in a store.
#[async_trait]
pub trait Collection<T: Item>: Send + Sync {
    /// Returns the collection name.
    fn name(&self) -> &str;

    /// Fetch the whole collection with its field metadata.
    ///
    /// Never fails at the type level: backend failures come back as a
    /// result with `status == false` and the error text as `message`.
    async fn fetch(&self) -> RetrievalResult<T>;

    /// Fetch entries, keeping only those that match `query`.
    ///
    /// An absent or empty query returns every entry. Surviving entries keep
    /// their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] if the underlying fetch failed.
    async fn fetch_entries(&self, query: Option<&Expression>) -> Result<Vec<T>> {
        let data = self.fetch().await.into_result()?;
        filter_entries(data.entries, query)
    }

    /// Like [`fetch_entries`](Self::fetch_entries), but a failed fetch
    /// yields an empty vector.
    ///
    /// Callers cannot tell "no entries" from "fetch failed" through this
    /// method; the failure is only logged.
    async fn fetch_entries_or_empty(&self, query: Option<&Expression>) -> Vec<T> {
        match self.fetch_entries(query).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(collection = self.name(), error = %e, "Fetch failed, returning no entries");
                Vec::new()
            }
        }
    }
}

/// Keep the entries that match `query`, in order.
///
/// Entries are matched on their JSON representation.
pub fn filter_entries<T: Item>(entries: Vec<T>, query: Option<&Expression>) -> Result<Vec<T>> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Ok(entries);
    };

    let mut kept = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let value = serde_json::to_value(&entry).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Entry {
                key: index.to_string(),
                reason: e.to_string(),
            })
        })?;

        if query.matches(&value) {
            kept.push(entry);
        }
    }

    Ok(kept)
}
