//! Separation of a document blob into fields and subcollections.
//!
//! The legacy export format stores a document's fields and its subcollections side by side
//! in one JSON object, without any tag telling them apart. On import the two are separated
//! with a structural heuristic: an object-valued entry is a subcollection when at least one
//! of its own values is an object (a subcollection maps document keys to document blobs,
//! and blobs are objects).
//!
//! The rule is lossy. A field holding an object that itself contains an object, such as
//! `{"profile": {"address": {"city": "Paris"}}}`, is read back as a `profile` subcollection
//! with one `address` document. Existing export files depend on this exact rule, so it is
//! kept as is; the tagged format in [`crate::tree`] avoids the ambiguity.

use serde_json::Value;

use crate::document::{FieldMap, is_plain_object};

/// A document blob split into the fields to write and the subcollections to recurse into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedBlob {
    /// Entries written as the document's field set.
    pub fields: FieldMap,
    /// Entries recognized as nested collections: name to `docKey -> blob` mapping.
    pub subcollections: Vec<(String, FieldMap)>,
}

/// Returns `true` when `value` has the shape of a collection of documents.
///
/// That is: `value` is an object and at least one of its own values is also an object.
pub fn looks_like_doc_collection(value: &Value) -> bool {
    match value {
        Value::Object(map) => has_doc_structure(map),
        _ => false,
    }
}

fn has_doc_structure(map: &FieldMap) -> bool {
    map.values().any(is_plain_object)
}

/// Splits a document blob into fields and subcollections, preserving entry order.
pub fn classify(blob: FieldMap) -> ClassifiedBlob {
    let mut classified = ClassifiedBlob::default();

    for (key, value) in blob {
        match value {
            Value::Object(map) if has_doc_structure(&map) => {
                classified.subcollections.push((key, map));
            }
            other => {
                classified.fields.insert(key, other);
            }
        }
    }

    classified
}
