//! Cockpit HTTP client.

use tracing::{debug, instrument, trace};
use url::Url;

use storez_core::error::{DecodeError, Error, InvalidInputError, ProtocolError, TransportError};
use storez_core::{ApiBaseUrl, Result};

use crate::wire::{CollectionResponse, ErrorResponse};

/// Maps a reqwest failure onto the storez transport error.
///
/// The request URL carries the token, so it is stripped from the message.
fn map_reqwest(err: reqwest::Error) -> Error {
    let err = err.without_url();
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// HTTP client for one Cockpit instance.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct CockpitClient {
    client: reqwest::Client,
    base: ApiBaseUrl,
    token: String,
}

impl CockpitClient {
    /// Create a client for the Cockpit instance at `base`.
    pub fn new(base: ApiBaseUrl, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("storez/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self {
            client,
            base,
            token: token.into(),
        })
    }

    /// Returns the base URL this client talks to.
    pub fn base(&self) -> &ApiBaseUrl {
        &self.base
    }

    /// Returns the URL of the `collections/get` endpoint for `name`, without
    /// the token.
    pub fn collection_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base.as_url().clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidInput(InvalidInputError::BaseUrl {
                    value: self.base.to_string(),
                    reason: "cannot be a base".to_string(),
                })
            })?
            .pop_if_empty()
            .extend(["api", "collections", "get", name]);
        Ok(url)
    }

    /// Fetch the raw collection payload. One request, no retry.
    #[instrument(skip(self), fields(base = %self.base))]
    pub(crate) async fn get_collection(&self, name: &str) -> Result<CollectionResponse> {
        let url = self.collection_url(name)?;
        debug!(%url, "Cockpit collection request");

        let response = self
            .client
            .get(url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        trace!(status = %status, "Cockpit response");

        let body = response.bytes().await.map_err(map_reqwest)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error);
            return Err(ProtocolError::new(status.as_u16(), message).into());
        }

        serde_json::from_slice(&body).map_err(|e| {
            Error::from(DecodeError::Body {
                message: e.to_string(),
            })
        })
    }
}

impl std::fmt::Debug for CockpitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CockpitClient")
            .field("base", &self.base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
