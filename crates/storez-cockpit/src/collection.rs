//! Cockpit-backed collection.

use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use storez_core::traits::Collection;
use storez_core::{CollectionData, Item, Result, RetrievalResult};

use crate::client::CockpitClient;

/// A collection served by a Cockpit instance.
///
/// Every fetch issues exactly one request; nothing is cached.
pub struct CockpitCollection<T> {
    name: String,
    client: CockpitClient,
    _item: PhantomData<fn() -> T>,
}

impl<T: Item> CockpitCollection<T> {
    pub(crate) fn new(name: &str, client: CockpitClient) -> Self {
        Self {
            name: name.to_string(),
            client,
            _item: PhantomData,
        }
    }

    /// Returns the client shared with the owning store.
    pub fn client(&self) -> &CockpitClient {
        &self.client
    }

    async fn load(&self) -> Result<CollectionData<T>> {
        let response = self.client.get_collection(&self.name).await?;
        response.into_collection_data()
    }
}

#[async_trait]
impl<T: Item> Collection<T> for CockpitCollection<T> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    async fn fetch(&self) -> RetrievalResult<T> {
        match self.load().await {
            Ok(data) => {
                debug!(entries = data.entries.len(), "Fetched collection");
                RetrievalResult::success(&self.name, data)
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                RetrievalResult::failure(&self.name, e.to_string())
            }
        }
    }
}

impl<T> std::fmt::Debug for CockpitCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CockpitCollection")
            .field("name", &self.name)
            .field("client", &self.client)
            .finish()
    }
}
