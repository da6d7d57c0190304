mod common;

use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

use docport::{memory::InMemoryStore, prelude::*};

use common::{RecordingStore, fields, seed};

fn legacy(value: serde_json::Value) -> ExportedTree {
    ExportedTree::from_value(value, TreeFormat::Legacy).unwrap()
}

#[tokio::test]
async fn test_import_replaces_existing_fields() {
    let store = DocumentStore::new(InMemoryStore::new());
    seed(store.backend(), &[("users/u1", json!({ "name": "Alice", "age": 30 }))]).await;

    store
        .import_tree(legacy(json!({ "users": { "u1": { "name": "Bob" } } })))
        .await
        .unwrap();

    assert_eq!(
        store.backend().document(&DocumentPath::parse("users/u1").unwrap()).await,
        Some(fields(json!({ "name": "Bob" }))),
    );
}

#[tokio::test]
async fn test_empty_collection_performs_no_writes() {
    let store = DocumentStore::new(RecordingStore::new());
    let summary = store.import_tree(legacy(json!({ "users": {} }))).await.unwrap();

    assert_eq!(summary, ImportSummary { collections: 1, documents: 0 });
    assert!(store.backend().writes().is_empty());
}

#[tokio::test]
async fn test_writes_follow_source_order_depth_first() {
    let store = DocumentStore::new(RecordingStore::new());

    store
        .import_tree(legacy(json!({
            "users": {
                "u2": { "name": "B", "posts": { "p1": { "t": 1 }, "p0": { "t": 0 } } },
                "u1": { "name": "A" },
            }
        })))
        .await
        .unwrap();

    assert_eq!(
        store.backend().writes(),
        vec!["users/u2", "users/u2/posts/p1", "users/u2/posts/p0", "users/u1"],
    );
}

#[tokio::test]
async fn test_concurrent_import_writes_parents_first() {
    let mut users = serde_json::Map::new();
    for i in 0..30 {
        users.insert(
            format!("u{i}"),
            json!({ "n": i, "posts": { "p1": { "t": i }, "p2": { "t": i } } }),
        );
    }

    let store = DocumentStore::new(RecordingStore::new())
        .with_options(TraversalOptions::default().with_concurrency(6));
    let summary = store
        .import_tree(legacy(json!({ "users": users })))
        .await
        .unwrap();

    assert_eq!(summary.documents, 90);

    let writes = store.backend().writes();
    assert_eq!(writes.len(), 90);

    for i in 0..30 {
        let parent = writes.iter().position(|w| *w == format!("users/u{i}")).unwrap();
        for post in ["p1", "p2"] {
            let child = writes
                .iter()
                .position(|w| *w == format!("users/u{i}/posts/{post}"))
                .unwrap();
            assert!(parent < child, "users/u{i}/posts/{post} written before its parent");
        }
    }
}

#[tokio::test]
async fn test_write_failure_aborts_and_names_path() {
    let store = DocumentStore::new(RecordingStore::failing_write("users/u2/posts/p1"));

    let err = store
        .import_tree(legacy(json!({
            "users": {
                "u1": { "name": "A" },
                "u2": { "name": "B", "posts": { "p1": { "t": 1 }, "p2": { "t": 2 } } },
                "u3": { "name": "C" },
            }
        })))
        .await
        .unwrap_err();

    match err {
        DocumentStoreError::Write { path, reason } => {
            assert_eq!(path, "users/u2/posts/p1");
            assert!(reason.contains("quota exceeded"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(store.backend().writes(), vec!["users/u1", "users/u2"]);
}

#[tokio::test]
async fn test_invalid_keys_are_rejected() {
    let store = DocumentStore::new(RecordingStore::new());

    let err = store
        .import_tree(legacy(json!({ "users": { "a/b": { "name": "A" } } })))
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentStoreError::InvalidPath(_)));
    assert!(store.backend().writes().is_empty());
}

#[tokio::test]
async fn test_malformed_files() {
    let store = DocumentStore::new(RecordingStore::new());

    let mut invalid_json = NamedTempFile::new().unwrap();
    invalid_json.write_all(b"{ \"users\": ").unwrap();
    assert!(matches!(
        store.import_file(invalid_json.path(), TreeFormat::Legacy).await,
        Err(DocumentStoreError::Serialization(_))
    ));

    let mut wrong_root = NamedTempFile::new().unwrap();
    wrong_root.write_all(b"{ \"users\": [1, 2, 3] }").unwrap();
    assert!(matches!(
        store.import_file(wrong_root.path(), TreeFormat::Legacy).await,
        Err(DocumentStoreError::InvalidTree(path, _)) if path == "users"
    ));

    assert!(matches!(
        store.import_file("/no/such/file.json", TreeFormat::Legacy).await,
        Err(DocumentStoreError::Io(_))
    ));

    assert!(store.backend().writes().is_empty());
}

#[tokio::test]
async fn test_import_subtree_under_nested_parent() {
    let store = DocumentStore::new(InMemoryStore::new());
    let collection = CollectionTree::from_legacy(
        "posts",
        fields(json!({ "p1": { "title": "Hi" } })),
    )
    .unwrap();

    let written = store.import_subtree("users/u1/posts", collection).await.unwrap();

    assert_eq!(written, 1);
    assert_eq!(
        store.backend().document(&DocumentPath::parse("users/u1/posts/p1").unwrap()).await,
        Some(fields(json!({ "title": "Hi" }))),
    );
}
