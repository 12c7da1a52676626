//! storez-cockpit - Content store backed by the Cockpit CMS REST API.
//!
//! Collections are read with
//! `GET {apiBaseUrl}/api/collections/get/{name}?token={apiToken}`. Each
//! entry's `_id` is copied into `id`; the original field stays in place.

mod client;
mod collection;
mod store;
mod wire;

pub use client::CockpitClient;
pub use collection::CockpitCollection;
pub use store::{ADAPTER, API_BASE_URL, API_TOKEN, API_URL, CockpitOptions, CockpitStore};
pub use wire::PRIMARY_KEY;
