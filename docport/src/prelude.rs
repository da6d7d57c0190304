//! Convenient re-exports of commonly used types from docport.
//!
//! ```ignore
//! use docport::prelude::*;
//! ```

pub use docport_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    classify::{ClassifiedBlob, classify, looks_like_doc_collection},
    document::{DocumentSnapshot, FieldMap},
    error::{DocumentStoreError, DocumentStoreResult},
    import::ImportSummary,
    options::TraversalOptions,
    path::{CollectionPath, DocumentPath},
    store::DocumentStore,
    tree::{CollectionTree, DocumentTree, ExportedTree, TreeFormat, read_tree_file, write_tree_file},
};
