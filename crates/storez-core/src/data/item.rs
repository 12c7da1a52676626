//! Item trait and the dynamic entry type.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A schema-less entry: a JSON object.
pub type Entry = Map<String, Value>;

/// Name of the normalized identifier field.
pub const ID_FIELD: &str = "id";

/// Any type that can live in a collection.
///
/// Entries cross backend boundaries as JSON, so an item only needs to be
/// serde-compatible. Blanket-implemented.
pub trait Item: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> Item for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// Returns the `id` of a JSON entry, if it is an object carrying a string id.
pub fn entry_id(entry: &Value) -> Option<&str> {
    entry.get(ID_FIELD).and_then(Value::as_str)
}

/// Copies `source_key` into the `id` field of every object entry that has it.
///
/// The source field is kept. Entries without it, and non-object entries,
/// are left unchanged.
pub fn normalize_ids(entries: &mut [Value], source_key: &str) {
    for entry in entries.iter_mut() {
        if let Value::Object(map) = entry
            && let Some(id) = map.get(source_key).cloned()
        {
            map.insert(ID_FIELD.to_string(), id);
        }
    }
}
