//! Response envelope returned by every query-facing tool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BauplanError, ErrorKind, Result};

/// One result row: column name to JSON value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Outcome of a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Describes a successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetadata {
    /// Number of rows in `data`.
    pub row_count: usize,
    /// Column names in result order.
    pub column_names: Vec<String>,
    /// Column types, parallel to `column_names`.
    pub column_types: Vec<String>,
    /// When the result was formatted.
    pub query_time: DateTime<Utc>,
    /// The query text exactly as received.
    pub query: String,
}

/// Uniform success/error wrapper.
///
/// On success `data.len() == metadata.row_count`; on error `data` is empty
/// and `metadata` serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: Status,
    pub data: Vec<Row>,
    #[serde(with = "metadata_serde")]
    pub metadata: Option<QueryMetadata>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ResponseEnvelope {
    /// Creates a successful envelope.
    pub fn success(data: Vec<Row>, metadata: QueryMetadata) -> Self {
        Self {
            status: Status::Success,
            data,
            metadata: Some(metadata),
            error: None,
            error_kind: None,
        }
    }

    /// Creates an error envelope from the given failure.
    ///
    /// Connection failures keep their "Unable to connect" prefix; every other
    /// failure reports the bare message, with `error_kind` telling them apart.
    pub fn failure(err: &BauplanError) -> Self {
        let error = match err {
            BauplanError::Connection(_) => err.to_string(),
            _ => err.message().to_string(),
        };

        Self {
            status: Status::Error,
            data: Vec::new(),
            metadata: None,
            error: Some(error),
            error_kind: Some(err.kind()),
        }
    }

    /// Returns true if the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Number of rows carried in `data`.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Serializes the envelope as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BauplanError::internal(format!("Failed to serialize response: {}", e)))
    }
}

/// Serde support for metadata that is `{}` rather than `null` when absent.
mod metadata_serde {
    use super::QueryMetadata;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(metadata: &Option<QueryMetadata>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match metadata {
            Some(metadata) => metadata.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<QueryMetadata>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => Ok(None),
            other => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
        }
    }
}
