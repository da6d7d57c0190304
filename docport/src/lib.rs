//! Main docport crate: export a hierarchical document-store collection to nested JSON and
//! import it back.
//!
//! This crate is the primary entry point. It re-exports the core types from
//! `docport-core` and gives access to the available storage backends.
//!
//! # Features
//!
//! - **Recursive export** - Documents and arbitrarily deep subcollections in one JSON tree
//! - **Recursive import** - Full-overwrite writes that recreate the same hierarchy
//! - **Two file layouts** - The legacy heuristic layout and an explicit tagged layout
//! - **Multiple backends** - In-memory and MongoDB storage behind one trait
//!
//! # Quick Start
//!
//! ```ignore
//! use docport::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await.unwrap());
//!
//!     let tree = ExportedTree::from_value(
//!         json!({ "users": { "u1": { "name": "Alice", "posts": { "p1": { "meta": {} } } } } }),
//!         TreeFormat::Legacy,
//!     )
//!     .unwrap();
//!
//!     store.import_tree(tree).await.unwrap();
//!     store.export_to_file("users", "users.json", TreeFormat::Legacy).await.unwrap();
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use docport_core::{backend, classify, document, error, export, import, options, path, store, tree};

// Re-export JSON types for convenience
pub use serde_json;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docport_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docport_mongodb::{
        DatabaseId, MongoDbStore, MongoDbStoreBuilder, ServiceAccount,
        credentials::{CredentialError, FALLBACK_DATABASE},
    };
}
