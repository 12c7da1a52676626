//! Field metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes one field of a collection's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    /// Field name.
    pub name: String,

    /// Field kind, as the backend names it (`text`, `number`, `boolean`, ...).
    #[serde(rename = "type")]
    pub field_type: String,

    /// Whether the field has per-locale values.
    #[serde(default)]
    pub localize: bool,

    /// Open per-field configuration. Backends send either a list or an object.
    #[serde(default)]
    pub options: Value,
}

impl FieldData {
    /// Create a non-localized field with no options.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            localize: false,
            options: Value::Null,
        }
    }

    /// Returns the JSON kind of a value, as used for derived field types.
    pub fn kind_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_defaults() {
        let field: FieldData = serde_json::from_value(json!({
            "name": "title",
            "type": "text"
        }))
        .unwrap();

        assert_eq!(field, FieldData::new("title", "text"));
    }

    #[test]
    fn serializes_type_key() {
        let value = serde_json::to_value(FieldData::new("v", "number")).unwrap();
        assert_eq!(value["type"], "number");
        assert!(value.get("field_type").is_none());
    }

    #[test]
    fn json_kinds() {
        assert_eq!(FieldData::kind_of(&json!(1.5)), "number");
        assert_eq!(FieldData::kind_of(&json!([1])), "array");
        assert_eq!(FieldData::kind_of(&json!({"a": 1})), "object");
    }
}
