//! Core traits for stores and collections.

mod collection;
mod store;

pub use collection::{Collection, filter_entries};
pub use store::ContentStore;
