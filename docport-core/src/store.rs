//! Main document store handle for exporting and importing trees.
//!
//! A [`DocumentStore`] wraps a configured backend together with the traversal options. It is
//! constructed explicitly once per run and passed to whatever needs store access; nothing
//! is cached in global state.
//!
//! # Example
//!
//! ```ignore
//! use docport::{store::DocumentStore, tree::TreeFormat};
//!
//! let store = DocumentStore::new(backend);
//! store.export_to_file("users", "users.json", TreeFormat::Legacy).await?;
//! store.import_file("users.json", TreeFormat::Legacy).await?;
//! ```

use std::path::Path;

use crate::{
    backend::StoreBackend,
    error::DocumentStoreResult,
    export,
    import::{self, ImportSummary},
    options::TraversalOptions,
    path::CollectionPath,
    tree::{self, CollectionTree, ExportedTree, TreeFormat},
};

/// A document store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
    options: TraversalOptions,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend and default options.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            options: TraversalOptions::default(),
        }
    }

    /// Replaces the traversal options used by every export and import.
    pub fn with_options(mut self, options: TraversalOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &TraversalOptions {
        &self.options
    }

    /// Exports the collection at `collection` (root or nested) and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DocumentStoreError::Read`] naming the failing path if any
    /// store read fails.
    pub async fn export_collection(&self, collection: &str) -> DocumentStoreResult<CollectionTree> {
        export::export_collection(
            &self.backend,
            &CollectionPath::parse(collection)?,
            &self.options,
        )
        .await
    }

    /// Exports `collection` wrapped as the single root of an [`ExportedTree`].
    pub async fn export_tree(&self, collection: &str) -> DocumentStoreResult<ExportedTree> {
        export::export_tree(&self.backend, collection, &self.options).await
    }

    /// Exports `collection` and writes it to `output`, overwriting any existing file.
    ///
    /// The file is only created once the whole tree has been read, so a failed export
    /// never leaves a partial file behind.
    pub async fn export_to_file(
        &self,
        collection: &str,
        output: impl AsRef<Path>,
        format: TreeFormat,
    ) -> DocumentStoreResult<usize> {
        let tree = self.export_tree(collection).await?;
        let documents = tree.document_count();

        tree::write_tree_file(output, tree, format)?;

        Ok(documents)
    }

    /// Imports every root collection of `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DocumentStoreError::Write`] naming the failing path on the
    /// first failed write; documents written before the failure stay written.
    pub async fn import_tree(&self, tree: ExportedTree) -> DocumentStoreResult<ImportSummary> {
        import::import_tree(&self.backend, tree, &self.options).await
    }

    /// Imports `collection` under the collection path `parent`.
    pub async fn import_subtree(
        &self,
        parent: &str,
        collection: CollectionTree,
    ) -> DocumentStoreResult<usize> {
        import::import_subtree(
            &self.backend,
            &CollectionPath::parse(parent)?,
            collection,
            &self.options,
        )
        .await
    }

    /// Reads a tree file and imports it. The file is fully decoded before the first write.
    pub async fn import_file(
        &self,
        input: impl AsRef<Path>,
        format: TreeFormat,
    ) -> DocumentStoreResult<ImportSummary> {
        let tree = tree::read_tree_file(input, format)?;

        self.import_tree(tree).await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}
