//! Core types for document representation.
//!
//! Documents are untyped: a document is a key plus a [`FieldMap`] of JSON values. The map
//! preserves insertion order so exported files list fields the way the store returned them.

use serde_json::{Map, Value};

/// The scalar, array and plain-object attributes of a document, excluding subcollections.
pub type FieldMap = Map<String, Value>;

/// A document as read from a collection: its key and its complete field map.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    /// Unique key of the document within its parent collection.
    pub key: String,
    /// The document's fields.
    pub fields: FieldMap,
}

impl DocumentSnapshot {
    /// Creates a snapshot from a key and field map.
    pub fn new(key: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// Consumes the snapshot, returning its key and fields.
    pub fn into_parts(self) -> (String, FieldMap) {
        (self.key, self.fields)
    }
}

/// Returns `true` when `value` is a JSON object (arrays and `null` excluded).
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}
