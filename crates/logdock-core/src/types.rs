//! Core types for log records.
//!
//! This module provides:
//! - [`RecordId`] — Unique identifier for stored records
//! - [`Metadata`] — Optional nested metadata for a record
//! - [`LogRecord`] — A stored log record with assigned identity
//! - [`NewLogRecord`] — Ingest payload before identity assignment
//!
//! Wire names follow the ingest format: camelCase for
//! `resourceId`, `traceId`, `spanId`, and `parentResourceId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a stored log record.
///
/// Assigned by the store at insert time and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

/// Nested metadata attached one-to-one to a log record.
///
/// A record owns at most one metadata block; the block never outlives
/// its record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Parent resource identifier.
    #[serde(rename = "parentResourceId", default)]
    pub parent_resource_id: String,
}

/// A single ingested log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Log level (free-form short text).
    #[serde(default)]
    pub level: String,
    /// The log message body.
    #[serde(default)]
    pub message: String,
    /// Resource identifier.
    #[serde(rename = "resourceId", default)]
    pub resource_id: String,
    /// When the event happened. Always present and timezone-aware.
    pub timestamp: DateTime<Utc>,
    /// Trace identifier.
    #[serde(rename = "traceId", default)]
    pub trace_id: String,
    /// Span identifier.
    #[serde(rename = "spanId", default)]
    pub span_id: String,
    /// Commit the emitting code was built from.
    #[serde(default)]
    pub commit: String,
    /// Optional nested metadata. Absent metadata is a valid state.
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Ingest payload for a new log record.
///
/// Identical to [`LogRecord`] minus the identity, which the store
/// assigns. Text fields default to the empty string when the writer
/// omits them; `timestamp` is required and a payload without one is a
/// validation error at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLogRecord {
    /// Log level.
    #[serde(default)]
    pub level: String,
    /// The log message body.
    #[serde(default)]
    pub message: String,
    /// Resource identifier.
    #[serde(rename = "resourceId", default)]
    pub resource_id: String,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Trace identifier.
    #[serde(rename = "traceId", default)]
    pub trace_id: String,
    /// Span identifier.
    #[serde(rename = "spanId", default)]
    pub span_id: String,
    /// Commit the emitting code was built from.
    #[serde(default)]
    pub commit: String,
    /// Optional nested metadata.
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl NewLogRecord {
    /// Creates a payload with the given timestamp and empty text fields.
    #[must_use]
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            level: String::new(),
            message: String::new(),
            resource_id: String::new(),
            timestamp,
            trace_id: String::new(),
            span_id: String::new(),
            commit: String::new(),
            metadata: None,
        }
    }
}

impl LogRecord {
    /// Materializes a stored record from an ingest payload and an
    /// assigned identity.
    #[must_use]
    pub fn from_new(id: RecordId, new: NewLogRecord) -> Self {
        Self {
            id,
            level: new.level,
            message: new.message,
            resource_id: new.resource_id,
            timestamp: new.timestamp,
            trace_id: new.trace_id,
            span_id: new.span_id,
            commit: new.commit,
            metadata: new.metadata,
        }
    }

    /// Parent resource identifier, or the empty string when the record
    /// carries no metadata.
    #[must_use]
    pub fn parent_resource_id(&self) -> &str {
        self.metadata
            .as_ref()
            .map_or("", |m| m.parent_resource_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).single().expect("valid")
    }

    #[test]
    fn record_id_ordering_follows_assignment() {
        assert!(RecordId(1) < RecordId(2));
        assert_eq!(RecordId(7), RecordId(7));
    }

    #[test]
    fn new_record_deserializes_with_defaults() {
        let json = r#"{"timestamp": "2023-06-01T10:00:00Z"}"#;
        let record: NewLogRecord = serde_json::from_str(json).expect("deserialize");

        assert!(record.level.is_empty());
        assert!(record.message.is_empty());
        assert!(record.resource_id.is_empty());
        assert!(record.commit.is_empty());
        assert!(record.metadata.is_none());
        assert_eq!(record.timestamp, ts());
    }

    #[test]
    fn new_record_requires_timestamp() {
        let json = r#"{"level": "INFO", "message": "no timestamp"}"#;
        let result: Result<NewLogRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn new_record_accepts_nested_metadata() {
        let json = r#"{
            "level": "ERROR",
            "message": "disk full",
            "resourceId": "svc-1",
            "timestamp": "2023-06-01T10:00:00Z",
            "traceId": "t1",
            "spanId": "s1",
            "commit": "abc",
            "metadata": {"parentResourceId": "p1"}
        }"#;
        let record: NewLogRecord = serde_json::from_str(json).expect("deserialize");

        assert_eq!(record.resource_id, "svc-1");
        assert_eq!(record.trace_id, "t1");
        assert_eq!(record.span_id, "s1");
        assert_eq!(
            record.metadata.as_ref().map(|m| m.parent_resource_id.as_str()),
            Some("p1")
        );
    }

    #[test]
    fn record_serializes_camel_case_wire_names() {
        let record = LogRecord::from_new(
            RecordId(1),
            NewLogRecord {
                level: "INFO".to_string(),
                resource_id: "svc-1".to_string(),
                trace_id: "t1".to_string(),
                span_id: "s1".to_string(),
                metadata: Some(Metadata {
                    parent_resource_id: "p1".to_string(),
                }),
                ..NewLogRecord::at(ts())
            },
        );

        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"resourceId\""));
        assert!(json.contains("\"traceId\""));
        assert!(json.contains("\"spanId\""));
        assert!(json.contains("\"parentResourceId\""));
        assert!(!json.contains("resource_id"));
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = LogRecord::from_new(
            RecordId(9),
            NewLogRecord {
                level: "WARN".to_string(),
                message: "queue lagging".to_string(),
                metadata: Some(Metadata {
                    parent_resource_id: "root".to_string(),
                }),
                ..NewLogRecord::at(ts())
            },
        );

        let json = serde_json::to_string(&record).expect("serialize");
        let parsed: LogRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, record);
    }

    #[test]
    fn parent_resource_id_defaults_to_empty_without_metadata() {
        let record = LogRecord::from_new(RecordId(1), NewLogRecord::at(ts()));
        assert_eq!(record.parent_resource_id(), "");

        let with_meta = LogRecord::from_new(
            RecordId(2),
            NewLogRecord {
                metadata: Some(Metadata {
                    parent_resource_id: "p1".to_string(),
                }),
                ..NewLogRecord::at(ts())
            },
        );
        assert_eq!(with_meta.parent_resource_id(), "p1");
    }

    #[test]
    fn from_new_assigns_identity() {
        let record = LogRecord::from_new(RecordId(42), NewLogRecord::at(ts()));
        assert_eq!(record.id, RecordId(42));
    }
}
