//! Cockpit collection payloads.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use storez_core::data::normalize_ids;
use storez_core::error::{DecodeError, Error};
use storez_core::{CollectionData, FieldData, Item, Result};

/// Primary key field Cockpit puts on every entry.
pub const PRIMARY_KEY: &str = "_id";

/// Response from `GET /api/collections/get/{name}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionResponse {
    #[serde(default)]
    fields: Option<WireFields>,
    entries: Vec<Value>,
    #[serde(default)]
    total: Option<u64>,
}

/// Cockpit sends fields keyed by name; a plain list is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireFields {
    List(Vec<FieldData>),
    Named(BTreeMap<String, NamedField>),
}

#[derive(Debug, Deserialize)]
struct NamedField {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    field_type: String,
    #[serde(default)]
    localize: bool,
    #[serde(default)]
    options: Value,
}

/// Error body Cockpit returns on failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<String>,
}

impl CollectionResponse {
    /// Copy `_id` into `id` on every entry, then decode entries as `T`.
    pub(crate) fn into_collection_data<T: Item>(self) -> Result<CollectionData<T>> {
        let mut entries = self.entries;
        normalize_ids(&mut entries, PRIMARY_KEY);

        let total = self.total.or(Some(entries.len() as u64));
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value(entry).map_err(|e| {
                    Error::from(DecodeError::Entry {
                        index,
                        message: e.to_string(),
                    })
                })
            })
            .collect::<Result<Vec<T>>>()?;

        Ok(CollectionData {
            fields: self.fields.map(WireFields::into_fields).unwrap_or_default(),
            entries,
            total,
        })
    }
}

impl WireFields {
    fn into_fields(self) -> Vec<FieldData> {
        match self {
            WireFields::List(fields) => fields,
            WireFields::Named(named) => named
                .into_iter()
                .map(|(key, field)| FieldData {
                    name: field.name.unwrap_or(key),
                    field_type: field.field_type,
                    localize: field.localize,
                    options: field.options,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storez_core::Entry;

    fn parse(body: Value) -> CollectionResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn renames_primary_key() {
        let data: CollectionData<Entry> = parse(json!({
            "entries": [{"_id": "x", "title": "Hello"}]
        }))
        .into_collection_data()
        .unwrap();

        let entry = &data.entries[0];
        assert_eq!(entry["id"], "x");
        assert_eq!(entry["_id"], "x");
        assert_eq!(entry["title"], "Hello");
        assert_eq!(data.total, Some(1));
    }

    #[test]
    fn named_fields() {
        let data: CollectionData<Entry> = parse(json!({
            "fields": {
                "title": {"name": "title", "type": "text", "localize": true, "options": []},
                "body": {"type": "wysiwyg"}
            },
            "entries": [],
            "total": 0
        }))
        .into_collection_data()
        .unwrap();

        assert_eq!(data.fields.len(), 2);
        assert_eq!(data.fields[0].name, "body");
        assert_eq!(data.fields[0].field_type, "wysiwyg");
        assert!(data.fields[1].localize);
        assert_eq!(data.total, Some(0));
    }

    #[test]
    fn listed_fields() {
        let data: CollectionData<Entry> = parse(json!({
            "fields": [{"name": "v", "type": "number", "localize": false, "options": {}}],
            "entries": []
        }))
        .into_collection_data()
        .unwrap();

        assert_eq!(data.fields, vec![FieldData {
            options: json!({}),
            ..FieldData::new("v", "number")
        }]);
    }

    #[test]
    fn null_fields() {
        let data: CollectionData<Entry> = parse(json!({"fields": null, "entries": []}))
            .into_collection_data()
            .unwrap();
        assert!(data.fields.is_empty());
    }

    #[test]
    fn reports_undecodable_entry_index() {
        #[derive(Debug, Clone, serde::Serialize, Deserialize)]
        struct Strict {
            id: String,
            v: i64,
        }

        let err = parse(json!({
            "entries": [{"_id": "a", "v": 1}, {"_id": "b", "v": "two"}]
        }))
        .into_collection_data::<Strict>()
        .unwrap_err();

        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn entries_are_required() {
        assert!(serde_json::from_value::<CollectionResponse>(json!({"fields": []})).is_err());
    }
}
