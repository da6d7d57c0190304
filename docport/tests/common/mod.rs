#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use docport::{
    memory::InMemoryStore,
    prelude::*,
};

pub fn fields(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Writes each `(document path, fields)` pair in order.
pub async fn seed<B: StoreBackend>(backend: &B, documents: &[(&str, Value)]) {
    for (path, value) in documents {
        backend
            .set_document(&DocumentPath::parse(path).unwrap(), fields(value.clone()))
            .await
            .unwrap();
    }
}

/// In-memory backend that records every write and can fail on chosen paths.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: InMemoryStore,
    pub fail_read: Option<String>,
    pub fail_write: Option<String>,
    writes: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_read(path: &str) -> Self {
        Self {
            fail_read: Some(path.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_write(path: &str) -> Self {
        Self {
            fail_write: Some(path.to_string()),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreBackend for RecordingStore {
    async fn get_documents(&self, collection: &CollectionPath) -> DocumentStoreResult<Vec<DocumentSnapshot>> {
        if self.fail_read.as_deref() == Some(collection.as_str()) {
            return Err(DocumentStoreError::Backend("permission denied".into()));
        }

        self.inner.get_documents(collection).await
    }

    async fn list_child_collections(&self, document: &DocumentPath) -> DocumentStoreResult<Vec<String>> {
        if self.fail_read.as_deref() == Some(document.as_str()) {
            return Err(DocumentStoreError::Backend("permission denied".into()));
        }

        self.inner.list_child_collections(document).await
    }

    async fn set_document(&self, document: &DocumentPath, fields: FieldMap) -> DocumentStoreResult<()> {
        if self.fail_write.as_deref() == Some(document.as_str()) {
            return Err(DocumentStoreError::Backend("quota exceeded".into()));
        }

        self.writes.lock().unwrap().push(document.to_string());
        self.inner.set_document(document, fields).await
    }
}
