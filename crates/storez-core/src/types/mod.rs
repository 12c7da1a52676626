//! Validated configuration types.
//!
//! These types enforce their invariants at construction time.

mod base_url;

pub use base_url::ApiBaseUrl;
