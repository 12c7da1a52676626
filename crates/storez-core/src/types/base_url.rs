//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for a REST content backend.
///
/// Must be an absolute `http` or `https` URL with a host. A trailing slash
/// is dropped so endpoint paths can be appended directly.
///
/// # Example
///
/// ```
/// use storez_core::ApiBaseUrl;
///
/// let base = ApiBaseUrl::new("https://cms.example.com/").unwrap();
/// assert_eq!(base.endpoint("api/collections/get/posts"),
///            "https://cms.example.com/api/collections/get/posts");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not http(s), or has
    /// no host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the URL of `path` below this base.
    pub fn endpoint(&self, path: &str) -> String {
        // Url keeps a trailing slash on root paths.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string, without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let reason = if url.cannot_be_a_base() {
            "must be an absolute URL".to_string()
        } else if !matches!(url.scheme(), "http" | "https") {
            format!("unsupported scheme '{}', expected http or https", url.scheme())
        } else if url.host_str().is_none_or(str::is_empty) {
            "must have a host".to_string()
        } else if url.query().is_some() {
            "must not carry a query string".to_string()
        } else {
            return Ok(());
        };

        Err(InvalidInputError::BaseUrl {
            value: original.to_string(),
            reason,
        }
        .into())
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiBaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiBaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiBaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiBaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
