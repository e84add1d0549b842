//! # Record Types
//!
//! The single entity every repository stores.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                 Record                  │
//! │  ─────────────────────────────────────  │
//! │  uid       UUID v4 string, primary key  │
//! │  sku       secondary key (not unique)   │
//! │  metadata  Text("...") | Structured{..} │
//! └─────────────────────────────────────────┘
//! ```
//!
//! `uid` is assigned once, when the record is created, and never changes.
//! There is no update path: metadata is frozen after `add`.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Metadata
// =============================================================================

/// Opaque per-record payload.
///
/// Serialized untagged, so `Text` travels over the command channel as a
/// plain JSON string and `Structured` as whatever JSON it holds. A JSON
/// string is always `Text`: records normalize `Structured(String)` on
/// construction so what comes back off the wire compares equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Metadata {
    /// Display-ready text.
    Text(String),
    /// Arbitrary JSON.
    Structured(serde_json::Value),
}

impl Metadata {
    /// Creates text metadata.
    pub fn text(s: impl Into<String>) -> Self {
        Metadata::Text(s.into())
    }

    /// Creates metadata from arbitrary JSON; strings become `Text`.
    pub fn structured(v: serde_json::Value) -> Self {
        v.into()
    }

    /// Folds `Structured(String)` into `Text`.
    pub fn normalized(self) -> Self {
        match self {
            Metadata::Structured(serde_json::Value::String(s)) => Metadata::Text(s),
            other => other,
        }
    }

    /// Returns the text if this is text metadata.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Metadata::Text(s) => Some(s),
            Metadata::Structured(_) => None,
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metadata::Text(s) | Metadata::Structured(serde_json::Value::String(s)) => {
                f.write_str(s)
            }
            Metadata::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for Metadata {
    fn from(s: String) -> Self {
        Metadata::Text(s)
    }
}

impl From<&str> for Metadata {
    fn from(s: &str) -> Self {
        Metadata::Text(s.to_string())
    }
}

impl From<serde_json::Value> for Metadata {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => Metadata::Text(s),
            other => Metadata::Structured(other),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// A stored row: unique id, SKU, metadata.
///
/// Field names match the frontend's `RowData` so the struct serializes
/// straight into what the table view expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Record {
    /// Unique identifier (UUID v4).
    pub uid: String,

    /// Stock Keeping Unit - secondary lookup key.
    pub sku: String,

    /// Free-form payload, rendered by the repository's `format_metadata`.
    pub metadata: Metadata,
}

impl Record {
    /// Creates a record with a freshly generated uid.
    pub fn new(sku: impl Into<String>, metadata: impl Into<Metadata>) -> Self {
        Record {
            uid: generate_uid(),
            sku: sku.into(),
            metadata: metadata.into().normalized(),
        }
    }

    /// Rebuilds a record whose uid was assigned elsewhere (e.g. read back
    /// from storage).
    pub fn with_uid(
        uid: impl Into<String>,
        sku: impl Into<String>,
        metadata: impl Into<Metadata>,
    ) -> Self {
        Record {
            uid: uid.into(),
            sku: sku.into(),
            metadata: metadata.into().normalized(),
        }
    }
}

/// Generates a new record uid.
pub fn generate_uid() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record_gets_distinct_uids() {
        let a = Record::new("SKU1", "Metadata 1");
        let b = Record::new("SKU1", "Metadata 1");
        assert_ne!(a.uid, b.uid);
        assert!(Uuid::parse_str(&a.uid).is_ok());
    }

    #[test]
    fn test_text_metadata_is_a_plain_json_string() {
        let rec = Record::with_uid("u-1", "SKU1", "Metadata 1");
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            value,
            json!({ "uid": "u-1", "sku": "SKU1", "metadata": "Metadata 1" })
        );
    }

    #[test]
    fn test_structured_metadata_roundtrips_through_wire_shape() {
        let raw = json!({ "uid": "u-2", "sku": "SKU2", "metadata": { "color": "red" } });
        let rec: Record = serde_json::from_value(raw).unwrap();
        assert_eq!(rec.metadata, Metadata::Structured(json!({ "color": "red" })));
        assert_eq!(rec.metadata.to_string(), r#"{"color":"red"}"#);
    }

    #[test]
    fn test_json_string_becomes_text() {
        let m: Metadata = json!("hello").into();
        assert_eq!(m.as_text(), Some("hello"));
        assert_eq!(Metadata::structured(json!("hi")), Metadata::text("hi"));
    }

    #[test]
    fn test_string_valued_structured_metadata_survives_the_wire() {
        let raw = Metadata::Structured(json!("plain"));
        assert_eq!(raw.to_string(), "plain");

        let rec = Record::new("S", raw);
        assert_eq!(rec.metadata, Metadata::text("plain"));

        let back: Record = serde_json::from_value(serde_json::to_value(&rec).unwrap()).unwrap();
        assert_eq!(back, rec);
    }
}
