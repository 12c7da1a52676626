//! Cockpit-backed content store.

use std::sync::Arc;

use tracing::debug;

use storez_core::error::ConfigError;
use storez_core::traits::ContentStore;
use storez_core::{ApiBaseUrl, CollectionRegistry, Item, Result, StoreOptions};

use crate::client::CockpitClient;
use crate::collection::CockpitCollection;

/// Adapter name of the Cockpit backend.
pub const ADAPTER: &str = "cockpit";

/// Option key holding the API token.
pub const API_TOKEN: &str = "apiToken";

/// Option key holding the instance base URL.
pub const API_BASE_URL: &str = "apiBaseUrl";

/// Option key holding the derived API root (`{apiBaseUrl}/api`).
pub const API_URL: &str = "apiUrl";

/// Connection settings for a Cockpit instance.
#[derive(Debug, Clone)]
pub struct CockpitOptions {
    /// API token, sent as the `token` query parameter.
    pub api_token: String,
    /// Base URL of the Cockpit instance.
    pub api_base_url: String,
}

impl CockpitOptions {
    /// Read settings from a loader option map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] if either key is absent.
    pub fn from_map(options: &StoreOptions) -> Result<Self> {
        let get = |key: &str| {
            options.get(key).cloned().ok_or_else(|| ConfigError::MissingOption {
                adapter: ADAPTER.to_string(),
                key: key.to_string(),
            })
        };

        Ok(Self {
            api_token: get(API_TOKEN)?,
            api_base_url: get(API_BASE_URL)?,
        })
    }
}

/// A content store backed by the Cockpit CMS REST API.
///
/// Cheap to clone; clones share the same collections and HTTP client.
#[derive(Debug, Clone)]
pub struct CockpitStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    options: StoreOptions,
    client: CockpitClient,
    registry: CollectionRegistry,
}

impl CockpitStore {
    /// Create a store for the instance described by `opts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(opts: CockpitOptions) -> Result<Self> {
        Self::build(opts, StoreOptions::new())
    }

    /// Create a store from a loader option map.
    ///
    /// Keys other than `apiToken` and `apiBaseUrl` are kept in
    /// [`options`](ContentStore::options) as given.
    pub fn from_options(options: &StoreOptions) -> Result<Self> {
        Self::build(CockpitOptions::from_map(options)?, options.clone())
    }

    fn build(opts: CockpitOptions, mut options: StoreOptions) -> Result<Self> {
        let base = ApiBaseUrl::new(&opts.api_base_url)?;
        let client = CockpitClient::new(base.clone(), opts.api_token.clone())?;

        options.insert(API_TOKEN.to_string(), opts.api_token);
        options.insert(API_BASE_URL.to_string(), base.to_string());
        options.insert(API_URL.to_string(), base.endpoint("api"));

        debug!(base = %base, "Created Cockpit store");
        Ok(Self {
            inner: Arc::new(StoreInner {
                options,
                client,
                registry: CollectionRegistry::new(),
            }),
        })
    }

    /// Returns the HTTP client shared by this store's collections.
    pub fn client(&self) -> &CockpitClient {
        &self.inner.client
    }
}

impl ContentStore for CockpitStore {
    type Collection<T: Item> = CockpitCollection<T>;

    fn adapter(&self) -> &'static str {
        ADAPTER
    }

    fn options(&self) -> &StoreOptions {
        &self.inner.options
    }

    fn registry(&self) -> &CollectionRegistry {
        &self.inner.registry
    }

    fn col<T: Item>(&self, name: &str) -> Result<Arc<CockpitCollection<T>>> {
        let client = self.inner.client.clone();
        self.inner
            .registry
            .get_or_insert_with::<T, _, _>(name, || CockpitCollection::new(name, client))
    }
}
