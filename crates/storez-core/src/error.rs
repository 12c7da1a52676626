//! Error types for storez.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, decoding, configuration and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for storez operations.
///
/// Backends convert transport and decode failures into failed
/// [`RetrievalResult`](crate::RetrievalResult)s at the `fetch` boundary;
/// this type is what callers see everywhere else.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, generic HTTP).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-success status.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A response body or entry could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Store configuration errors (unknown adapter, missing option).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input validation errors (base URL, query expression, entry patch).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A fetch reported failure; surfaced by `fetch_entries`.
    #[error("fetch of collection '{collection}' failed: {message}")]
    Fetch { collection: String, message: String },

    /// A collection name was requested again with a different item type.
    #[error("collection '{name}' is already registered with item type {expected}")]
    CollectionType { name: String, expected: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Protocol-level errors from backend responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if it sent one.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the backend rejected our credentials.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Decoding errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response body was not the expected JSON shape.
    #[error("invalid response body: {message}")]
    Body { message: String },

    /// An entry did not decode as the collection's item type.
    #[error("entry {index} does not match the item type: {message}")]
    Entry { index: usize, message: String },
}

/// Configuration errors raised while building a store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No backend is registered under this name.
    #[error("unknown adapter '{name}'")]
    UnknownAdapter { name: String },

    /// A required option is absent.
    #[error("adapter '{adapter}' requires option '{key}'")]
    MissingOption { adapter: String, key: String },

    /// The store URI has no scheme to derive an adapter from.
    #[error("invalid store URI '{value}': {reason}")]
    InvalidUri { value: String, reason: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid query expression.
    #[error("invalid query: {reason}")]
    Query { reason: String },

    /// An entry or patch that cannot be stored.
    #[error("invalid entry '{key}': {reason}")]
    Entry { key: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl InvalidInputError {
    pub(crate) fn query(reason: impl Into<String>) -> Self {
        InvalidInputError::Query {
            reason: reason.into(),
        }
    }
}
