//! Store loading by adapter name or URI scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use storez_cockpit::CockpitStore;
use storez_core::error::{ConfigError, Error};
use storez_core::{Result, StoreOptions};
use storez_memory::MemoryStore;

use crate::any::AnyStore;

/// Loader option key naming the adapter.
pub const ADAPTER_KEY: &str = "adapter";

/// Loader option key holding the store URI.
pub const URI_KEY: &str = "uri";

/// The backends this build knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adapter {
    /// [`MemoryStore`].
    Memory,
    /// [`CockpitStore`].
    Cockpit,
}

impl Adapter {
    /// Every registered adapter.
    pub const ALL: [Adapter; 2] = [Adapter::Memory, Adapter::Cockpit];

    /// The name the adapter is registered under.
    pub fn name(self) -> &'static str {
        match self {
            Adapter::Memory => storez_memory::ADAPTER,
            Adapter::Cockpit => storez_cockpit::ADAPTER,
        }
    }

    /// Derive the adapter from the scheme of `uri` (the text before the
    /// first `:`).
    pub fn from_uri(uri: &str) -> Result<Self> {
        let scheme = match uri.split_once(':') {
            Some((scheme, _)) if !scheme.is_empty() => scheme,
            _ => {
                return Err(ConfigError::InvalidUri {
                    value: uri.to_string(),
                    reason: "expected '<adapter>:...'".to_string(),
                }
                .into());
            }
        };
        scheme.parse()
    }
}

impl FromStr for Adapter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Adapter::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| {
                ConfigError::UnknownAdapter {
                    name: s.to_string(),
                }
                .into()
            })
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to load: an adapter name or URI, plus backend options.
///
/// Deserializes from a flat map such as
/// `{"adapter": "cockpit", "apiToken": "...", "apiBaseUrl": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Adapter name. Takes precedence over the URI scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,

    /// Store URI; its scheme selects the adapter when `adapter` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Backend options, passed to the backend as given.
    #[serde(flatten)]
    pub options: StoreOptions,
}

impl LoadOptions {
    /// Split a flat option map into adapter, uri and backend options.
    pub fn from_map(mut map: StoreOptions) -> Self {
        Self {
            adapter: map.remove(ADAPTER_KEY),
            uri: map.remove(URI_KEY),
            options: map,
        }
    }

    /// Overlay `other` onto `self`; values set in `other` win.
    pub fn overlay(&mut self, other: LoadOptions) {
        if other.adapter.is_some() {
            self.adapter = other.adapter;
        }
        if other.uri.is_some() {
            self.uri = other.uri;
        }
        self.options.extend(other.options);
    }

    /// Resolve the adapter, or `None` if neither adapter nor uri is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAdapter`] for names that are not
    /// registered and [`ConfigError::InvalidUri`] for URIs without a scheme.
    pub fn resolve_adapter(&self) -> Result<Option<Adapter>> {
        match (&self.adapter, &self.uri) {
            (Some(name), _) => name.parse().map(Some),
            (None, Some(uri)) => Adapter::from_uri(uri).map(Some),
            (None, None) => Ok(None),
        }
    }

    /// Cockpit base URL carried in a `cockpit:<base-url>` URI.
    fn cockpit_base_from_uri(&self) -> Option<String> {
        let rest = self.uri.as_deref()?.strip_prefix("cockpit:")?;
        if rest.is_empty() {
            return None;
        }
        match rest.strip_prefix("//") {
            Some(host) => Some(format!("https://{}", host)),
            None => Some(rest.to_string()),
        }
    }
}

/// Construct the store `opts` describes.
///
/// With no options, or options naming neither adapter nor uri, the result
/// is an empty [`MemoryStore`]. An unknown adapter is an error; there is no
/// fallback to memory.
pub fn load_store(opts: Option<&LoadOptions>) -> Result<AnyStore> {
    let Some(opts) = opts else {
        debug!("No store options, using memory store");
        return Ok(AnyStore::Memory(MemoryStore::new()));
    };

    let adapter = opts.resolve_adapter()?.unwrap_or(Adapter::Memory);
    info!(%adapter, "Loading store");

    let store = match adapter {
        Adapter::Memory => AnyStore::Memory(MemoryStore::with_options(opts.options.clone())),
        Adapter::Cockpit => {
            let mut options = opts.options.clone();
            if !options.contains_key(storez_cockpit::API_BASE_URL)
                && let Some(base) = opts.cockpit_base_from_uri()
            {
                options.insert(storez_cockpit::API_BASE_URL.to_string(), base);
            }
            AnyStore::Cockpit(CockpitStore::from_options(&options)?)
        }
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storez_core::ContentStore;

    fn opts(pairs: &[(&str, &str)]) -> LoadOptions {
        LoadOptions::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn adapter_names() {
        assert_eq!("memory".parse::<Adapter>().unwrap(), Adapter::Memory);
        assert_eq!("cockpit".parse::<Adapter>().unwrap(), Adapter::Cockpit);
        assert_eq!(Adapter::Cockpit.to_string(), "cockpit");
        assert!(matches!(
            "Cockpit".parse::<Adapter>(),
            Err(Error::Config(ConfigError::UnknownAdapter { .. }))
        ));
    }

    #[test]
    fn adapter_from_uri_scheme() {
        assert_eq!(
            Adapter::from_uri("cockpit:https://cms.example.com").unwrap(),
            Adapter::Cockpit
        );
        assert_eq!(Adapter::from_uri("memory:").unwrap(), Adapter::Memory);
        assert!(matches!(
            Adapter::from_uri("cms.example.com"),
            Err(Error::Config(ConfigError::InvalidUri { .. }))
        ));
        assert!(matches!(
            Adapter::from_uri(":nothing"),
            Err(Error::Config(ConfigError::InvalidUri { .. }))
        ));
        assert!(matches!(
            Adapter::from_uri("mongodb://localhost"),
            Err(Error::Config(ConfigError::UnknownAdapter { .. }))
        ));
    }

    #[test]
    fn no_options_is_memory() {
        let store = load_store(None).unwrap();
        assert_eq!(store.adapter(), "memory");

        let store = load_store(Some(&LoadOptions::default())).unwrap();
        assert_eq!(store.adapter(), "memory");
    }

    #[test]
    fn explicit_adapter_wins_over_uri() {
        let o = opts(&[("adapter", "memory"), ("uri", "cockpit:https://cms.example.com")]);
        assert_eq!(o.resolve_adapter().unwrap(), Some(Adapter::Memory));
    }

    #[test]
    fn unknown_adapter_fails_fast() {
        let err = load_store(Some(&opts(&[("adapter", "ftp")]))).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnknownAdapter { ref name }) if name == "ftp"
        ));

        let err = load_store(Some(&opts(&[("uri", "ftp://files")]))).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownAdapter { .. })));
    }

    #[test]
    fn cockpit_from_options() {
        let store = load_store(Some(&opts(&[
            ("adapter", "cockpit"),
            ("apiToken", "t"),
            ("apiBaseUrl", "https://cms.example.com"),
        ])))
        .unwrap();

        assert_eq!(store.adapter(), "cockpit");
        assert_eq!(store.options()["apiUrl"], "https://cms.example.com/api");
    }

    #[test]
    fn cockpit_base_url_from_uri() {
        let store = load_store(Some(&opts(&[
            ("uri", "cockpit:https://cms.example.com"),
            ("apiToken", "t"),
        ])))
        .unwrap();
        assert_eq!(store.options()["apiBaseUrl"], "https://cms.example.com");

        let store = load_store(Some(&opts(&[
            ("uri", "cockpit://cms.example.com"),
            ("apiToken", "t"),
        ])))
        .unwrap();
        assert_eq!(store.options()["apiBaseUrl"], "https://cms.example.com");
    }

    #[test]
    fn cockpit_requires_token() {
        let err = load_store(Some(&opts(&[("uri", "cockpit:https://cms.example.com")])))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingOption { .. })));
    }

    #[test]
    fn deserializes_flat_map() {
        let o: LoadOptions = serde_json::from_value(serde_json::json!({
            "adapter": "cockpit",
            "apiToken": "t",
            "apiBaseUrl": "https://cms.example.com"
        }))
        .unwrap();

        assert_eq!(o.adapter.as_deref(), Some("cockpit"));
        assert_eq!(o.options.len(), 2);
        assert!(!o.options.contains_key("adapter"));
    }

    #[test]
    fn overlay_prefers_new_values() {
        let mut base = opts(&[("adapter", "memory"), ("apiToken", "old"), ("label", "x")]);
        base.overlay(opts(&[("adapter", "cockpit"), ("apiToken", "new")]));

        assert_eq!(base.adapter.as_deref(), Some("cockpit"));
        assert_eq!(base.options["apiToken"], "new");
        assert_eq!(base.options["label"], "x");
    }
}
