//! Storage backend abstraction for hierarchical document stores.
//!
//! This module defines the traits that abstract over store implementations, allowing the
//! exporter and importer to walk any store that organizes documents into collections and
//! nests collections under documents (in-memory, MongoDB, ...).
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use docport::backend::StoreBackend;
//! use docport::path::CollectionPath;
//! use serde_json::json;
//!
//! let backend = MyBackendImpl::new();
//! let user = CollectionPath::root("users")?.doc("u1")?;
//!
//! backend.set_document(&user, json!({ "name": "Alice" }).as_object().cloned().unwrap()).await?;
//! let children = backend.list_child_collections(&user).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    document::{DocumentSnapshot, FieldMap},
    error::DocumentStoreResult,
    path::{CollectionPath, DocumentPath},
};

/// Abstract interface for hierarchical document storage backends.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// async tasks, since sibling subtrees may be traversed concurrently.
///
/// # Error Handling
///
/// Operations return [`DocumentStoreResult<T>`](crate::error::DocumentStoreResult).
/// Backends report driver failures as
/// [`DocumentStoreError::Backend`](crate::error::DocumentStoreError::Backend); the traversal
/// attaches the failing path.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Retrieves every document directly inside a collection.
    ///
    /// Documents are returned in the store's order, which must be stable between calls so
    /// repeated exports produce identical files. A collection that does not exist yields an
    /// empty vector.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection to read
    async fn get_documents(
        &self,
        collection: &CollectionPath,
    ) -> DocumentStoreResult<Vec<DocumentSnapshot>>;

    /// Lists the names of the collections nested directly under a document.
    ///
    /// This is store metadata: a subcollection is listed even if the owning document has
    /// no fields of its own.
    ///
    /// # Arguments
    ///
    /// * `document` - The owning document
    async fn list_child_collections(
        &self,
        document: &DocumentPath,
    ) -> DocumentStoreResult<Vec<String>>;

    /// Writes a document, replacing its complete field set.
    ///
    /// Any field present on the stored document but absent from `fields` is removed. The
    /// document is created when it does not exist. Subcollections of the document are not
    /// touched.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to write
    /// * `fields` - The new contents of the document
    async fn set_document(
        &self,
        document: &DocumentPath,
        fields: FieldMap,
    ) -> DocumentStoreResult<()>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends holding connections override it.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn get_documents(
        &self,
        collection: &CollectionPath,
    ) -> DocumentStoreResult<Vec<DocumentSnapshot>> {
        (*self).get_documents(collection).await
    }

    async fn list_child_collections(
        &self,
        document: &DocumentPath,
    ) -> DocumentStoreResult<Vec<String>> {
        (*self)
            .list_child_collections(document)
            .await
    }

    async fn set_document(
        &self,
        document: &DocumentPath,
        fields: FieldMap,
    ) -> DocumentStoreResult<()> {
        (*self)
            .set_document(document, fields)
            .await
    }
}

/// Factory for backends whose construction needs async setup (connections, handshakes).
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
