mod common;

use serde_json::json;
use tempfile::TempDir;

use docport::{memory::InMemoryStore, prelude::*};

use common::{fields, seed};

async fn seeded_store() -> DocumentStore<InMemoryStore> {
    let store = DocumentStore::new(InMemoryStore::new());

    seed(
        store.backend(),
        &[
            ("users/alice", json!({ "name": "Alice", "age": 30, "tags": ["admin", "ops"] })),
            ("users/alice/posts/p1", json!({ "title": "Hi", "likes": 3 })),
            ("users/alice/posts/p2", json!({ "title": "Again", "draft": true })),
            ("users/alice/posts/p1/comments/c1", json!({ "text": "nice", "by": "bob" })),
            ("users/bob", json!({ "name": "Bob", "age": null })),
            ("users/carol", json!({})),
            ("users/carol/settings/main", json!({ "theme": "dark" })),
        ],
    )
    .await;

    store
}

#[tokio::test]
async fn test_export_then_import_recreates_tree() {
    let source = seeded_store().await;
    let exported = source.export_tree("users").await.unwrap();

    let target = DocumentStore::new(InMemoryStore::new());
    let summary = target.import_tree(exported.clone()).await.unwrap();

    assert_eq!(summary, ImportSummary { collections: 1, documents: 7 });
    assert_eq!(target.export_tree("users").await.unwrap(), exported);
    assert_eq!(
        target.backend().collection_paths().await,
        source.backend().collection_paths().await,
    );
}

#[tokio::test]
async fn test_file_round_trip_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let source = seeded_store().await;
    assert_eq!(source.export_to_file("users", &first, TreeFormat::Legacy).await.unwrap(), 7);

    let target = DocumentStore::new(InMemoryStore::new());
    target.import_file(&first, TreeFormat::Legacy).await.unwrap();
    target.export_to_file("users", &second, TreeFormat::Legacy).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap(),
    );
}

#[tokio::test]
async fn test_export_layout() {
    let store = seeded_store().await;
    let value = store.export_tree("users").await.unwrap().into_value(TreeFormat::Legacy);

    assert_eq!(
        value,
        json!({
            "users": {
                "alice": {
                    "name": "Alice",
                    "age": 30,
                    "tags": ["admin", "ops"],
                    "posts": {
                        "p1": { "title": "Hi", "likes": 3, "comments": { "c1": { "text": "nice", "by": "bob" } } },
                        "p2": { "title": "Again", "draft": true },
                    },
                },
                "bob": { "name": "Bob", "age": null },
                "carol": { "settings": { "main": { "theme": "dark" } } },
            }
        }),
    );
}

#[tokio::test]
async fn test_five_levels_deep() {
    let store = DocumentStore::new(InMemoryStore::new());
    let paths = [
        "root/d1",
        "root/d1/c1/d2",
        "root/d1/c1/d2/c2/d3",
        "root/d1/c1/d2/c2/d3/c3/d4",
        "root/d1/c1/d2/c2/d3/c3/d4/c4/d5",
    ];

    for (level, path) in paths.iter().enumerate() {
        seed(store.backend(), &[(*path, json!({ "level": level + 1 }))]).await;
    }

    let exported = store.export_tree("root").await.unwrap();
    let encoded = exported.into_value(TreeFormat::Legacy);
    let decoded = ExportedTree::from_value(encoded, TreeFormat::Legacy).unwrap();

    let target = DocumentStore::new(InMemoryStore::new());
    target.import_tree(decoded).await.unwrap();

    for (level, path) in paths.iter().enumerate() {
        assert_eq!(
            target.backend().document(&DocumentPath::parse(path).unwrap()).await,
            Some(fields(json!({ "level": level + 1 }))),
            "missing {path}",
        );
    }
}

#[tokio::test]
async fn test_deep_tree_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("deep.json");
    let store = DocumentStore::new(InMemoryStore::new());

    let mut paths = vec!["root/d0".to_string()];
    for level in 1..70 {
        let parent = paths[level - 1].clone();
        paths.push(format!("{parent}/c{level}/d{level}"));
    }

    for (level, path) in paths.iter().enumerate() {
        seed(store.backend(), &[(path.as_str(), json!({ "level": level }))]).await;
    }

    assert_eq!(store.export_to_file("root", &file, TreeFormat::Legacy).await.unwrap(), 70);

    let target = DocumentStore::new(InMemoryStore::new());
    let summary = target.import_file(&file, TreeFormat::Legacy).await.unwrap();

    assert_eq!(summary, ImportSummary { collections: 1, documents: 70 });
    assert_eq!(
        target.backend().document(&DocumentPath::parse(&paths[69]).unwrap()).await,
        Some(fields(json!({ "level": 69 }))),
    );
}

#[tokio::test]
async fn test_sibling_subcollections() {
    let store = DocumentStore::new(InMemoryStore::new());
    seed(
        store.backend(),
        &[
            ("users/u1", json!({ "name": "Alice" })),
            ("users/u1/posts/p1", json!({ "title": "Hi" })),
            ("users/u1/comments/c1", json!({ "text": "First" })),
        ],
    )
    .await;

    let value = store.export_tree("users").await.unwrap().into_value(TreeFormat::Legacy);
    assert_eq!(
        value,
        json!({ "users": { "u1": {
            "name": "Alice",
            "comments": { "c1": { "text": "First" } },
            "posts": { "p1": { "title": "Hi" } },
        } } }),
    );

    let target = DocumentStore::new(InMemoryStore::new());
    target
        .import_tree(ExportedTree::from_value(value, TreeFormat::Legacy).unwrap())
        .await
        .unwrap();

    let backend = target.backend();
    assert_eq!(backend.document(&DocumentPath::parse("users/u1").unwrap()).await, Some(fields(json!({ "name": "Alice" }))));
    assert_eq!(backend.document(&DocumentPath::parse("users/u1/posts/p1").unwrap()).await, Some(fields(json!({ "title": "Hi" }))));
    assert_eq!(backend.document(&DocumentPath::parse("users/u1/comments/c1").unwrap()).await, Some(fields(json!({ "text": "First" }))));
}

#[tokio::test]
async fn test_empty_collection_exports_empty_object() {
    let store = DocumentStore::new(InMemoryStore::new());
    let value = store.export_tree("users").await.unwrap().into_value(TreeFormat::Legacy);

    assert_eq!(value, json!({ "users": {} }));
}

#[tokio::test]
async fn test_nested_collection_export_keeps_its_path() {
    let source = seeded_store().await;
    let exported = source.export_tree("users/alice/posts").await.unwrap();

    assert_eq!(exported.collections[0].0, "users/alice/posts");
    assert_eq!(exported.document_count(), 3);

    let target = DocumentStore::new(InMemoryStore::new());
    target.import_tree(exported).await.unwrap();

    assert_eq!(
        target.backend().collection_paths().await,
        vec!["users/alice/posts", "users/alice/posts/p1/comments"],
    );
}

#[tokio::test]
async fn test_tagged_format_preserves_object_fields() {
    let store = DocumentStore::new(InMemoryStore::new());
    seed(
        store.backend(),
        &[("users/u1", json!({ "profile": { "address": { "city": "Paris" } } }))],
    )
    .await;

    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("legacy.json");
    let tagged = dir.path().join("tagged.json");
    store.export_to_file("users", &legacy, TreeFormat::Legacy).await.unwrap();
    store.export_to_file("users", &tagged, TreeFormat::Tagged).await.unwrap();

    let from_legacy = DocumentStore::new(InMemoryStore::new());
    from_legacy.import_file(&legacy, TreeFormat::Legacy).await.unwrap();
    let from_tagged = DocumentStore::new(InMemoryStore::new());
    from_tagged.import_file(&tagged, TreeFormat::Tagged).await.unwrap();

    let user = DocumentPath::parse("users/u1").unwrap();

    // The legacy layout cannot tell the nested object apart from a subcollection.
    assert_eq!(from_legacy.backend().document(&user).await, Some(FieldMap::new()));
    assert_eq!(
        from_legacy.backend().document(&DocumentPath::parse("users/u1/profile/address").unwrap()).await,
        Some(fields(json!({ "city": "Paris" }))),
    );

    assert_eq!(
        from_tagged.backend().document(&user).await,
        Some(fields(json!({ "profile": { "address": { "city": "Paris" } } }))),
    );
    assert_eq!(from_tagged.backend().document_count().await, 1);
}

#[tokio::test]
async fn test_concurrent_export_keeps_store_order() {
    let store = DocumentStore::new(InMemoryStore::new());

    for i in 0..25 {
        let item = format!("items/i{i:02}");
        let part = format!("{item}/parts/p");

        seed(
            store.backend(),
            &[(item.as_str(), json!({ "n": i })), (part.as_str(), json!({ "of": i }))],
        )
        .await;
    }

    let sequential = store.export_tree("items").await.unwrap();
    let concurrent = DocumentStore::new(store.backend().clone())
        .with_options(TraversalOptions::default().with_concurrency(8))
        .export_tree("items")
        .await
        .unwrap();

    assert_eq!(sequential, concurrent);
    assert_eq!(
        serde_json::to_string(&sequential.into_value(TreeFormat::Legacy)).unwrap(),
        serde_json::to_string(&concurrent.into_value(TreeFormat::Legacy)).unwrap(),
    );
}
