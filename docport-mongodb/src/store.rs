use async_trait::async_trait;
use bson::{Bson, Document, de::deserialize_from_bson, doc, ser::serialize_to_bson};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions},
};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

use docport_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{DocumentSnapshot, FieldMap},
    error::{DocumentStoreError, DocumentStoreResult},
    path::{CollectionPath, DocumentPath},
};

use crate::{
    credentials::{DatabaseId, ServiceAccount},
    sanitizer::KeySanitizer,
};

const ID_FIELD: &str = "_id";

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection: &CollectionPath) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&KeySanitizer::sanitize_string(collection.as_str()))
    }

    fn prepare_document(document: &DocumentPath, fields: FieldMap) -> DocumentStoreResult<Document> {
        let fields = match serialize_to_bson(&Value::Object(fields))
            .map_err(|e| DocumentStoreError::Serialization(e.to_string()))?
        {
            Bson::Document(fields) => fields,
            _ => return Err(DocumentStoreError::Serialization("Expected document".into())),
        };

        Ok(Document::from_iter(
            vec![(ID_FIELD.to_string(), Bson::String(document.id().to_string()))]
                .into_iter()
                .chain(KeySanitizer::sanitize_document(fields)),
        ))
    }

    fn restore_document(document: Document) -> DocumentStoreResult<DocumentSnapshot> {
        let key = document_key(document.get(ID_FIELD))?;

        let fields = deserialize_from_bson::<Value>(Bson::Document(KeySanitizer::restore_document(document)))
            .map_err(|e| DocumentStoreError::Serialization(e.to_string()))?;

        match fields {
            Value::Object(fields) => Ok(DocumentSnapshot::new(key, fields)),
            _ => Err(DocumentStoreError::Serialization("Expected document".into())),
        }
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        debug!(database = %self.database, "closing MongoDB client");
        self.client.shutdown().await;

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn get_documents(&self, collection: &CollectionPath) -> DocumentStoreResult<Vec<DocumentSnapshot>> {
        let mut options = FindOptions::default();
        // Document keys give a stable order across runs.
        options.sort = Some(doc! { ID_FIELD: 1 });

        self.get_collection(collection)
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
            .into_iter()
            .map(Self::restore_document)
            .collect::<DocumentStoreResult<Vec<DocumentSnapshot>>>()
    }

    async fn list_child_collections(&self, document: &DocumentPath) -> DocumentStoreResult<Vec<String>> {
        let prefix = format!("{}/", KeySanitizer::sanitize_string(document.as_str()));

        let names = self.client
            .database(&self.database)
            .list_collection_names()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
            .into_iter()
            .filter_map(|name| {
                name.strip_prefix(&prefix)
                    .and_then(|rest| rest.split('/').next())
                    .map(KeySanitizer::restore_string)
            })
            .collect::<BTreeSet<_>>();

        Ok(names.into_iter().collect())
    }

    async fn set_document(&self, document: &DocumentPath, fields: FieldMap) -> DocumentStoreResult<()> {
        let replacement = Self::prepare_document(document, fields)?;

        self.get_collection(&document.parent())
            .replace_one(doc! { ID_FIELD: document.id() }, replacement)
            .upsert(true)
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.shutdown().await
    }
}

/// Document key of a stored document. Keys written by other tools may be object ids or
/// numbers, which are exported in their display form.
fn document_key(id: Option<&Bson>) -> DocumentStoreResult<String> {
    match id {
        Some(Bson::String(key)) => Ok(key.clone()),
        Some(Bson::ObjectId(oid)) => Ok(oid.to_hex()),
        Some(Bson::Int32(n)) => Ok(n.to_string()),
        Some(Bson::Int64(n)) => Ok(n.to_string()),
        Some(other) => Err(DocumentStoreError::Backend(format!(
            "unsupported document key type {:?}",
            other.element_type()
        ))),
        None => Err(DocumentStoreError::Backend("document without _id".into())),
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }

    /// Builder for the database `id` reachable with `account`.
    pub fn from_service_account(account: &ServiceAccount, id: &DatabaseId) -> Self {
        Self::new(&account.connection_string, &account.database_name(id))
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        debug!(database = %self.database, "connecting to MongoDB");

        Ok(MongoDbStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
            )
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
