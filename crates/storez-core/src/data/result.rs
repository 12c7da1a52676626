//! Collection snapshots and fetch results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::FieldData;
use crate::error::Error;

/// Message carried by a successful [`RetrievalResult`].
pub const SUCCESS_MESSAGE: &str = "Successfully retrieved data";

/// A full collection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionData<T> {
    /// Field metadata.
    #[serde(default)]
    pub fields: Vec<FieldData>,

    /// The entries, in backend order.
    pub entries: Vec<T>,

    /// Total number of entries the backend reports, if it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> CollectionData<T> {
    /// Create a snapshot whose total is the number of entries.
    pub fn new(fields: Vec<FieldData>, entries: Vec<T>) -> Self {
        let total = Some(entries.len() as u64);
        Self {
            fields,
            entries,
            total,
        }
    }
}

/// Context attached to every fetch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalInfo {
    /// The collection that was fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,

    /// When the fetch completed.
    pub retrieved_at: DateTime<Utc>,
}

/// Success or failure envelope for a fetch.
///
/// Failures are values, not errors: `status` is false and `message` holds
/// the underlying error text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult<T> {
    /// Whether the fetch succeeded.
    pub status: bool,

    /// Human-readable outcome.
    pub message: String,

    /// Fetch context.
    pub info: RetrievalInfo,

    /// The snapshot, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CollectionData<T>>,
}

impl<T> RetrievalResult<T> {
    /// A successful fetch of `collection`.
    pub fn success(collection: &str, data: CollectionData<T>) -> Self {
        Self {
            status: true,
            message: SUCCESS_MESSAGE.to_string(),
            info: RetrievalInfo::now(collection),
            data: Some(data),
        }
    }

    /// A failed fetch of `collection`.
    pub fn failure(collection: &str, message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            info: RetrievalInfo::now(collection),
            data: None,
        }
    }

    /// Returns true if the fetch succeeded.
    pub fn is_success(&self) -> bool {
        self.status
    }

    /// Converts into the snapshot, or an [`Error::Fetch`] carrying the message.
    pub fn into_result(self) -> Result<CollectionData<T>, Error> {
        let collection = self.info.collection_name.unwrap_or_default();
        match (self.status, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(Error::Fetch {
                collection,
                message: "backend reported success without data".to_string(),
            }),
            (false, _) => Err(Error::Fetch {
                collection,
                message: self.message,
            }),
        }
    }
}

impl RetrievalInfo {
    fn now(collection: &str) -> Self {
        Self {
            collection_name: Some(collection.to_string()),
            retrieved_at: Utc::now(),
        }
    }
}

/// Before/after state of a write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeResult<T> {
    /// The entry before the write, if there was one.
    pub initial: Option<T>,

    /// The entry after the write.
    pub new: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn success_envelope_shape() {
        let data = CollectionData::new(vec![], vec![json!({"id": "a"})]);
        let result = RetrievalResult::success("posts", data);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["status"], true);
        assert_eq!(value["message"], SUCCESS_MESSAGE);
        assert_eq!(value["info"]["collectionName"], "posts");
        assert!(value["info"]["retrievedAt"].is_string());
        assert_eq!(value["data"]["total"], 1);
    }

    #[test]
    fn failure_omits_data() {
        let result: RetrievalResult<Value> = RetrievalResult::failure("posts", "boom");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["status"], false);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn failure_into_result() {
        let result: RetrievalResult<Value> = RetrievalResult::failure("posts", "connection refused");
        match result.into_result() {
            Err(Error::Fetch {
                collection,
                message,
            }) => {
                assert_eq!(collection, "posts");
                assert_eq!(message, "connection refused");
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[test]
    fn collection_data_accepts_missing_fields() {
        let data: CollectionData<Value> =
            serde_json::from_value(json!({"entries": [{"id": 1}]})).unwrap();
        assert!(data.fields.is_empty());
        assert_eq!(data.total, None);
        assert_eq!(data.entries.len(), 1);
    }
}
