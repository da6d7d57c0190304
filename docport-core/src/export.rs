//! Recursive export of a live collection into an [`ExportedTree`].
//!
//! The walk is store-driven: documents are fetched per collection and subcollections are
//! discovered from store metadata, never inferred from field values. Any read failure
//! aborts the whole export and is reported with the path that failed.

use futures::{
    FutureExt, StreamExt, TryStreamExt,
    future::BoxFuture,
    stream,
};
use tracing::{debug, info};

use crate::{
    backend::StoreBackend,
    document::DocumentSnapshot,
    error::DocumentStoreResult,
    options::TraversalOptions,
    path::CollectionPath,
    tree::{CollectionTree, DocumentTree, ExportedTree},
};

/// Exports `collection` and wraps it under its own path as the single root of a tree.
///
/// `collection` may be a root collection (`users`) or a nested one (`users/u1/posts`); the
/// path string becomes the root key of the exported file.
pub async fn export_tree<B>(
    backend: &B,
    collection: &str,
    options: &TraversalOptions,
) -> DocumentStoreResult<ExportedTree>
where
    B: StoreBackend,
{
    let path = CollectionPath::parse(collection)?;

    info!(collection = %path, "exporting collection");

    let tree = export_collection(backend, &path, options).await?;

    info!(
        collection = %path,
        documents = tree.document_count(),
        "export finished"
    );

    Ok(ExportedTree::single(collection, tree))
}

/// Exports every document under `path` along with all nested subcollections.
///
/// Documents keep the order returned by the store, also when siblings are read
/// concurrently.
pub async fn export_collection<B>(
    backend: &B,
    path: &CollectionPath,
    options: &TraversalOptions,
) -> DocumentStoreResult<CollectionTree>
where
    B: StoreBackend,
{
    let snapshots = backend
        .get_documents(path)
        .await
        .map_err(|e| e.reading(path))?;

    debug!(
        collection = %path,
        depth = path.depth(),
        documents = snapshots.len(),
        "read collection"
    );

    let documents = stream::iter(snapshots)
        .map(|snapshot| export_document(backend, path, snapshot, options))
        .buffered(options.concurrency())
        .try_collect::<Vec<_>>()
        .await?;

    Ok(CollectionTree { documents })
}

fn export_document<'a, B>(
    backend: &'a B,
    parent: &'a CollectionPath,
    snapshot: DocumentSnapshot,
    options: &'a TraversalOptions,
) -> BoxFuture<'a, DocumentStoreResult<DocumentTree>>
where
    B: StoreBackend,
{
    async move {
        let (key, fields) = snapshot.into_parts();
        let path = parent.doc(&key)?;

        let names = backend
            .list_child_collections(&path)
            .await
            .map_err(|e| e.reading(&path))?;

        let mut subcollections = Vec::with_capacity(names.len());

        for name in names {
            let child = path.collection(&name)?;
            let collection = export_collection(backend, &child, options).await?;

            subcollections.push((name, collection));
        }

        Ok(DocumentTree {
            key,
            fields,
            subcollections,
        })
    }
    .boxed()
}
