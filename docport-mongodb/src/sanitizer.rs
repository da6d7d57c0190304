//! Key sanitization for MongoDB compatibility.
//!
//! MongoDB restricts field names and collection names, while the documents being imported
//! may use arbitrary keys. Keys are escaped on the way in and restored on the way out.
//! Only keys and names are touched; string values are stored verbatim.

use bson::{Bson, Document};

/// Sanitizes and restores document keys and collection names.
///
/// MongoDB does not allow field names to contain:
/// - Dots (`.`) - used for nested field access in queries
/// - Dollar signs (`$`) - used for operators in queries
/// - Null bytes (`\0`) - field name terminators
///
/// In addition `_id` is reserved for the document key, so a field literally named `_id`
/// is stored as `__id__`.
pub struct KeySanitizer;

impl KeySanitizer {
    /// Character replacements for sanitization
    const REPLACEMENTS: [(&'static str, &'static str); 3] = [
        (".", "__dot__"),
        ("$", "__dollar__"),
        ("\0", "__null__"),
    ];

    const ID_FIELD: &'static str = "_id";
    const ESCAPED_ID_FIELD: &'static str = "__id__";

    /// Recursively sanitizes the keys of nested documents, including those inside arrays.
    pub fn sanitize_value(value: Bson) -> Bson {
        match value {
            Bson::Array(arr) => Bson::Array(arr.into_iter().map(Self::sanitize_value).collect()),
            Bson::Document(doc) => Bson::Document(Self::sanitize_nested(doc)),
            other => other,
        }
    }

    /// Sanitizes a top-level document, escaping a user field named `_id`.
    pub fn sanitize_document(document: Document) -> Document {
        document
            .into_iter()
            .map(|(k, v)| {
                let key = if k == Self::ID_FIELD {
                    Self::ESCAPED_ID_FIELD.to_string()
                } else {
                    Self::sanitize_string(&k)
                };

                (key, Self::sanitize_value(v))
            })
            .collect()
    }

    fn sanitize_nested(document: Document) -> Document {
        document
            .into_iter()
            .map(|(k, v)| (Self::sanitize_string(&k), Self::sanitize_value(v)))
            .collect()
    }

    /// Sanitizes a string by replacing problematic characters with safe escaped versions.
    pub fn sanitize_string(input: &str) -> String {
        let mut sanitized = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter() {
            sanitized = sanitized.replace(*target, *replacement);
        }
        sanitized
    }

    /// Reverses [`sanitize_value`](Self::sanitize_value).
    pub fn restore_value(value: Bson) -> Bson {
        match value {
            Bson::Array(arr) => Bson::Array(arr.into_iter().map(Self::restore_value).collect()),
            Bson::Document(doc) => Bson::Document(
                doc.into_iter()
                    .map(|(k, v)| (Self::restore_string(&k), Self::restore_value(v)))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Reverses [`sanitize_document`](Self::sanitize_document). The `_id` key, if still
    /// present, is dropped.
    pub fn restore_document(document: Document) -> Document {
        document
            .into_iter()
            .filter(|(k, _)| k != Self::ID_FIELD)
            .map(|(k, v)| {
                let key = if k == Self::ESCAPED_ID_FIELD {
                    Self::ID_FIELD.to_string()
                } else {
                    Self::restore_string(&k)
                };

                (key, Self::restore_value(v))
            })
            .collect()
    }

    /// Restores a string by reverting sanitization escapes.
    pub fn restore_string(input: &str) -> String {
        let mut restored = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter().rev() {
            restored = restored.replace(*replacement, *target);
        }
        restored
    }
}
