//! In-memory storage implementation for hierarchical document stores.
//!
//! Collections are kept in a map keyed by their full path (`users`, `users/u1/posts`), so a
//! subcollection exists independently of whether its owning document has been written,
//! the same way hosted document stores behave.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use serde_json::Value;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use docport_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{DocumentSnapshot, FieldMap},
    error::DocumentStoreResult,
    path::{CollectionPath, DocumentPath},
};

/// Document key -> fields, in insertion order.
type CollectionMap = serde_json::Map<String, Value>;
/// Collection path -> documents. Sorted so child collection listings are stable.
type StoreMap = BTreeMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing it to be
/// shared across async tasks. Multiple clones of the same instance share the same data.
///
/// Documents inside a collection are returned in the order they were first written;
/// overwriting a document keeps its position. Child collections are listed by name in
/// ascending order.
///
/// # Example
///
/// ```ignore
/// use docport_memory::InMemoryStore;
/// use docport::{backend::StoreBackend, path::DocumentPath};
/// use serde_json::json;
///
/// let store = InMemoryStore::new();
/// let user = DocumentPath::parse("users/u1")?;
/// store.set_document(&user, json!({ "name": "Alice" }).as_object().cloned().unwrap()).await?;
/// assert_eq!(store.get_documents(&user.parent()).await?.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Reads a single document, or `None` when it has never been written.
    pub async fn document(&self, path: &DocumentPath) -> Option<FieldMap> {
        self.store
            .read()
            .await
            .get(path.parent().as_str())
            .and_then(|collection| collection.get(path.id()))
            .and_then(Value::as_object)
            .cloned()
    }

    /// Paths of every collection holding at least one document.
    pub async fn collection_paths(&self) -> Vec<String> {
        self.store
            .read()
            .await
            .iter()
            .filter(|(_, documents)| !documents.is_empty())
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Total number of documents across all collections.
    pub async fn document_count(&self) -> usize {
        self.store
            .read()
            .await
            .values()
            .map(CollectionMap::len)
            .sum()
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn get_documents(&self, collection: &CollectionPath) -> DocumentStoreResult<Vec<DocumentSnapshot>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection.as_str()) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(
            collection_map
                .iter()
                .map(|(key, fields)| {
                    DocumentSnapshot::new(
                        key.clone(),
                        fields.as_object().cloned().unwrap_or_default(),
                    )
                })
                .collect()
        )
    }

    async fn list_child_collections(&self, document: &DocumentPath) -> DocumentStoreResult<Vec<String>> {
        let prefix = format!("{document}/");
        let store = self.store.read().await;

        // A deeper collection (`users/u1/posts/p1/likes`) implies its ancestor `posts`.
        let names = store
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter_map(|(path, _)| path[prefix.len()..].split('/').next())
            .map(str::to_string)
            .collect::<BTreeSet<_>>();

        Ok(names.into_iter().collect())
    }

    async fn set_document(&self, document: &DocumentPath, fields: FieldMap) -> DocumentStoreResult<()> {
        self.store
            .write()
            .await
            .entry(document.parent().to_string())
            .or_default()
            .insert(document.id().to_string(), Value::Object(fields));

        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
