//! In-memory hierarchical storage backend for docport.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is ideal for tests and
//! for embedding the exporter/importer without an external store.
//!
//! # Quick Start
//!
//! ```ignore
//! use docport::{memory::InMemoryStore, store::DocumentStore, tree::TreeFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!
//!     store.import_file("users.json", TreeFormat::Legacy).await?;
//!     let users = store.export_tree("users").await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docport_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
