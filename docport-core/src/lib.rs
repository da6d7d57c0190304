//! Core of the docport project: export a hierarchical document-store collection to nested
//! JSON and import such JSON back, recreating the same document/subcollection hierarchy.
//!
//! This crate provides:
//!
//! - **Paths** ([`path`]) - Validated collection and document addresses
//! - **Documents** ([`document`]) - Field maps and document snapshots
//! - **Store backend abstraction** ([`backend`]) - Trait for hierarchical storage backends
//! - **Document store** ([`store`]) - Explicit store handle used by every traversal
//! - **Classifier** ([`classify`]) - Field vs. subcollection heuristic of the legacy format
//! - **Exporter** ([`export`]) and **importer** ([`import`]) - The recursive traversals
//! - **Tree formats** ([`tree`]) - Exported tree model and its JSON layouts
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docport::{memory::InMemoryStore, store::DocumentStore, tree::TreeFormat};
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! store.import_file("users.json", TreeFormat::Legacy).await?;
//! store.export_to_file("users", "copy.json", TreeFormat::Legacy).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docport_core;

pub mod backend;
pub mod classify;
pub mod document;
pub mod error;
pub mod export;
pub mod import;
pub mod options;
pub mod path;
pub mod store;
pub mod tree;
