//! In-memory form of an exported store tree and its JSON file formats.
//!
//! The exporter produces an [`ExportedTree`] and the importer consumes one. Between the two
//! sits a JSON file in one of two layouts, selected with [`TreeFormat`]:
//!
//! - [`TreeFormat::Legacy`] (default): a document blob mixes fields and subcollections in
//!   one object. Reading it relies on the heuristic in [`crate::classify`].
//!
//!   ```json
//!   { "users": { "user1": { "name": "Alice", "posts": { "post1": { "title": "Hi" } } } } }
//!   ```
//!
//! - [`TreeFormat::Tagged`]: every blob separates the two explicitly, so any tree
//!   round-trips exactly.
//!
//!   ```json
//!   { "users": { "user1": {
//!       "__fields__": { "name": "Alice" },
//!       "__subcollections__": { "posts": { "post1": { "__fields__": { "title": "Hi" }, "__subcollections__": {} } } }
//!   } } }
//!   ```

use serde::Deserialize;
use serde_json::Value;
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use crate::{
    classify::{ClassifiedBlob, classify},
    document::FieldMap,
    error::{DocumentStoreError, DocumentStoreResult},
};

/// Key holding a document's fields in the tagged format.
pub const FIELDS_KEY: &str = "__fields__";
/// Key holding a document's subcollections in the tagged format.
pub const SUBCOLLECTIONS_KEY: &str = "__subcollections__";

/// A collection and, recursively, everything below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionTree {
    /// Documents in store order.
    pub documents: Vec<DocumentTree>,
}

/// A document with its fields and its subcollections.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    pub key: String,
    pub fields: FieldMap,
    /// Subcollections keyed by name, in store order.
    pub subcollections: Vec<(String, CollectionTree)>,
}

impl CollectionTree {
    /// Total number of documents in this collection and all nested collections.
    pub fn document_count(&self) -> usize {
        self.documents
            .iter()
            .map(|document| {
                1 + document
                    .subcollections
                    .iter()
                    .map(|(_, collection)| collection.document_count())
                    .sum::<usize>()
            })
            .sum()
    }

    /// Renders the collection as a legacy `docKey -> blob` mapping.
    ///
    /// A subcollection whose name matches a field name replaces that field in the blob.
    pub fn into_legacy(self) -> FieldMap {
        self.documents
            .into_iter()
            .map(|document| {
                let mut blob = document.fields;

                for (name, collection) in document.subcollections {
                    blob.insert(name, Value::Object(collection.into_legacy()));
                }

                (document.key, Value::Object(blob))
            })
            .collect()
    }

    /// Reads a legacy `docKey -> blob` mapping, classifying every blob.
    ///
    /// `path` is only used to locate errors.
    pub fn from_legacy(path: &str, documents: FieldMap) -> DocumentStoreResult<Self> {
        let mut tree = Self::default();

        for (key, value) in documents {
            let document_path = format!("{path}/{key}");
            let blob = expect_object(&document_path, value, "a document object")?;
            let ClassifiedBlob {
                fields,
                subcollections,
            } = classify(blob);

            let subcollections = subcollections
                .into_iter()
                .map(|(name, documents)| {
                    Self::from_legacy(&format!("{document_path}/{name}"), documents)
                        .map(|collection| (name, collection))
                })
                .collect::<DocumentStoreResult<Vec<_>>>()?;

            tree.documents.push(DocumentTree {
                key,
                fields,
                subcollections,
            });
        }

        Ok(tree)
    }

    /// Renders the collection as a tagged `docKey -> {__fields__, __subcollections__}` mapping.
    pub fn into_tagged(self) -> FieldMap {
        self.documents
            .into_iter()
            .map(|document| {
                let subcollections = document
                    .subcollections
                    .into_iter()
                    .map(|(name, collection)| (name, Value::Object(collection.into_tagged())))
                    .collect::<FieldMap>();

                let mut blob = FieldMap::new();
                blob.insert(FIELDS_KEY.to_string(), Value::Object(document.fields));
                blob.insert(SUBCOLLECTIONS_KEY.to_string(), Value::Object(subcollections));

                (document.key, Value::Object(blob))
            })
            .collect()
    }

    /// Reads a tagged mapping. Both tag keys are optional; any other key is rejected.
    pub fn from_tagged(path: &str, documents: FieldMap) -> DocumentStoreResult<Self> {
        let mut tree = Self::default();

        for (key, value) in documents {
            let document_path = format!("{path}/{key}");
            let blob = expect_object(&document_path, value, "a tagged document object")?;
            let mut fields = FieldMap::new();
            let mut subcollections = Vec::new();

            for (tag, value) in blob {
                match tag.as_str() {
                    FIELDS_KEY => {
                        fields = expect_object(&document_path, value, "an object of fields")?;
                    }
                    SUBCOLLECTIONS_KEY => {
                        let collections =
                            expect_object(&document_path, value, "an object of subcollections")?;

                        for (name, value) in collections {
                            let collection_path = format!("{document_path}/{name}");
                            let documents =
                                expect_object(&collection_path, value, "an object of documents")?;

                            subcollections.push((name, Self::from_tagged(&collection_path, documents)?));
                        }
                    }
                    other => {
                        return Err(DocumentStoreError::InvalidTree(
                            document_path,
                            format!("unexpected key `{other}` in tagged document"),
                        ));
                    }
                }
            }

            tree.documents.push(DocumentTree {
                key,
                fields,
                subcollections,
            });
        }

        Ok(tree)
    }
}

/// File layout used to (de)serialize an [`ExportedTree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeFormat {
    /// Fields and subcollections share one object per document.
    #[default]
    Legacy,
    /// Fields and subcollections are stored under explicit keys.
    Tagged,
}

impl FromStr for TreeFormat {
    type Err = DocumentStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "tagged" => Ok(Self::Tagged),
            other => Err(DocumentStoreError::Serialization(format!(
                "unknown tree format `{other}`, expected `legacy` or `tagged`"
            ))),
        }
    }
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Tagged => f.write_str("tagged"),
        }
    }
}

/// A fully materialized export: root collection names mapped to their trees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportedTree {
    /// Root collections in file order. The key is the collection path as written in the file.
    pub collections: Vec<(String, CollectionTree)>,
}

impl ExportedTree {
    /// Creates a tree holding a single root collection.
    pub fn single(name: impl Into<String>, collection: CollectionTree) -> Self {
        Self {
            collections: vec![(name.into(), collection)],
        }
    }

    /// Total number of documents across all root collections.
    pub fn document_count(&self) -> usize {
        self.collections
            .iter()
            .map(|(_, collection)| collection.document_count())
            .sum()
    }

    /// Converts the tree into its JSON representation.
    pub fn into_value(self, format: TreeFormat) -> Value {
        Value::Object(
            self.collections
                .into_iter()
                .map(|(name, collection)| {
                    let documents = match format {
                        TreeFormat::Legacy => collection.into_legacy(),
                        TreeFormat::Tagged => collection.into_tagged(),
                    };

                    (name, Value::Object(documents))
                })
                .collect(),
        )
    }

    /// Builds a tree from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidTree`] when the root, a collection or a document
    /// is not an object, or when a tagged document has unexpected keys.
    pub fn from_value(value: Value, format: TreeFormat) -> DocumentStoreResult<Self> {
        let root = expect_object("<root>", value, "an object mapping collection names to documents")?;
        let mut tree = Self::default();

        for (name, value) in root {
            let documents = expect_object(&name, value, "an object of documents")?;
            let collection = match format {
                TreeFormat::Legacy => CollectionTree::from_legacy(&name, documents)?,
                TreeFormat::Tagged => CollectionTree::from_tagged(&name, documents)?,
            };

            tree.collections.push((name, collection));
        }

        Ok(tree)
    }
}

/// Reads and decodes a tree file.
///
/// # Errors
///
/// Fails with [`DocumentStoreError::Io`] when the file cannot be read,
/// [`DocumentStoreError::Serialization`] when it is not valid JSON and
/// [`DocumentStoreError::InvalidTree`] when it does not have the expected shape.
pub fn read_tree_file(path: impl AsRef<Path>, format: TreeFormat) -> DocumentStoreResult<ExportedTree> {
    let contents = std::fs::read_to_string(path.as_ref())?;

    // JSON nesting is twice the tree depth, which has no upper bound.
    let mut deserializer = serde_json::Deserializer::from_str(&contents);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;

    ExportedTree::from_value(value, format)
}

/// Encodes a tree and writes it as pretty-printed JSON, replacing any existing file.
pub fn write_tree_file(
    path: impl AsRef<Path>,
    tree: ExportedTree,
    format: TreeFormat,
) -> DocumentStoreResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);

    serde_json::to_writer_pretty(&mut writer, &tree.into_value(format))?;
    writer.flush()?;

    Ok(())
}

fn expect_object(path: &str, value: Value, expected: &str) -> DocumentStoreResult<FieldMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DocumentStoreError::InvalidTree(
            path.to_string(),
            format!("expected {expected}, found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
