//! Recursive import of an [`ExportedTree`] into a store.
//!
//! Every document is written as a full replacement of its field set before any of its
//! subcollections are visited, so a document's children are always written after it.
//! The first failed write aborts the import; nothing is retried.

use futures::{
    FutureExt, StreamExt, TryStreamExt,
    future::BoxFuture,
    stream,
};
use tracing::{debug, info};

use crate::{
    backend::StoreBackend,
    error::DocumentStoreResult,
    options::TraversalOptions,
    path::CollectionPath,
    tree::{CollectionTree, DocumentTree, ExportedTree},
};

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of root collections processed.
    pub collections: usize,
    /// Number of documents written, nested ones included.
    pub documents: usize,
}

/// Imports every root collection of `tree`, in file order.
pub async fn import_tree<B>(
    backend: &B,
    tree: ExportedTree,
    options: &TraversalOptions,
) -> DocumentStoreResult<ImportSummary>
where
    B: StoreBackend,
{
    let mut summary = ImportSummary::default();

    for (name, collection) in tree.collections {
        let path = CollectionPath::parse(&name)?;

        info!(collection = %path, "importing collection");

        let written = import_subtree(backend, &path, collection, options).await?;

        info!(collection = %path, documents = written, "import finished");

        summary.collections += 1;
        summary.documents += written;
    }

    Ok(summary)
}

/// Writes all documents of `collection` under `parent`, then recurses into their
/// subcollections. Returns the number of documents written.
pub async fn import_subtree<B>(
    backend: &B,
    parent: &CollectionPath,
    collection: CollectionTree,
    options: &TraversalOptions,
) -> DocumentStoreResult<usize>
where
    B: StoreBackend,
{
    debug!(
        collection = %parent,
        depth = parent.depth(),
        documents = collection.documents.len(),
        "importing subtree"
    );

    stream::iter(collection.documents)
        .map(|document| import_document(backend, parent, document, options))
        .buffer_unordered(options.concurrency())
        .try_fold(0, |total, written| async move { Ok(total + written) })
        .await
}

fn import_document<'a, B>(
    backend: &'a B,
    parent: &'a CollectionPath,
    document: DocumentTree,
    options: &'a TraversalOptions,
) -> BoxFuture<'a, DocumentStoreResult<usize>>
where
    B: StoreBackend,
{
    async move {
        let DocumentTree {
            key,
            fields,
            subcollections,
        } = document;
        let path = parent.doc(&key)?;

        debug!(document = %path, fields = fields.len(), "writing document");

        backend
            .set_document(&path, fields)
            .await
            .map_err(|e| e.writing(&path))?;

        let mut written = 1;

        for (name, collection) in subcollections {
            let child = path.collection(&name)?;

            written += import_subtree(backend, &child, collection, options).await?;
        }

        Ok(written)
    }
    .boxed()
}
