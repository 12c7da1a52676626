//! storez-memory - In-memory content store.
//!
//! Meant for tests and as the default store when nothing else is
//! configured. Collections keep entries in insertion order and support
//! partial-update writes through [`MemoryCollection::put`].

mod collection;
mod store;

pub use collection::MemoryCollection;
pub use store::{ADAPTER, MemoryStore};
