//! Log search response types
//!
//! Models one page of the Logs Search API (`GET /api/v2/logs/events`).
//! Every field the tailer reads is optional on the wire, so the models are
//! optional-everything: a batch with no entries, an entry with no
//! attributes, or a response with no pagination metadata all deserialize
//! cleanly.

use serde::{Deserialize, Serialize};

/// One page of log entries plus its pagination metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogBatch {
    /// Log entries, oldest first
    #[serde(default)]
    pub data: Vec<LogEntry>,
    /// Pagination metadata; absent when the service provides none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl LogBatch {
    /// True when the page carries no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A single remote log record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEntry {
    /// Record id assigned by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record payload; entries without attributes carry nothing to render
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<LogAttributes>,
}

/// The renderable fields of a log record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogAttributes {
    /// Event time; rendering substitutes wall-clock time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    /// Emitting service name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Severity, e.g. "info" or "error"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Message body; entries without one are dropped by the formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Top-level response metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageMeta>,
}

/// Cursor container for the next page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    /// Opaque resume token for the next fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let json = r#"{
            "data": [
                {
                    "id": "AAAA1234",
                    "attributes": {
                        "timestamp": "2024-03-01T12:00:00Z",
                        "service": "web-app",
                        "status": "info",
                        "message": "request handled"
                    }
                }
            ],
            "meta": { "page": { "after": "cursor-token" } }
        }"#;

        let batch: LogBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.data.len(), 1);
        let attrs = batch.data[0].attributes.as_ref().unwrap();
        assert_eq!(attrs.service.as_deref(), Some("web-app"));
        assert_eq!(attrs.message.as_deref(), Some("request handled"));
        assert_eq!(
            batch.meta.unwrap().page.unwrap().after.as_deref(),
            Some("cursor-token")
        );
    }

    #[test]
    fn test_deserialize_sparse_response() {
        // No meta, entry with no message: both are valid pages.
        let json = r#"{"data":[{"attributes":{"service":"web-app"}}]}"#;

        let batch: LogBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.data.len(), 1);
        assert!(batch.meta.is_none());
        let attrs = batch.data[0].attributes.as_ref().unwrap();
        assert!(attrs.message.is_none());
        assert!(attrs.timestamp.is_none());
    }

    #[test]
    fn test_deserialize_empty_response() {
        let batch: LogBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.is_empty());
        assert!(batch.meta.is_none());
    }
}
