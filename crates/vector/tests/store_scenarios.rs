//! End-to-end scenarios over real table adapters

use std::sync::Arc;

use ragstore_table::{BackingTable, JsonFileTable, MemoryTable, TableItem};
use ragstore_vector::{EmbeddingStore, VectorRecord};

fn record(content: &str, vector: Vec<f32>, source: &str) -> VectorRecord {
    VectorRecord::new(content, vector).with_source(source)
}

#[tokio::test]
async fn query_returns_exact_match_first() {
    let store = EmbeddingStore::new(Arc::new(MemoryTable::new()), 2);
    store
        .add(vec![
            record("chunk one", vec![1.0, 0.0], "A").with_id("id1"),
            record("chunk two", vec![0.0, 1.0], "B").with_id("id2"),
        ])
        .await
        .unwrap();

    let hits = store
        .similarity_search_with_score(&[1.0, 0.0], 1)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.content, "chunk one");
    assert!((hits[0].1 - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn k_zero_returns_nothing_and_k_large_returns_all() {
    let store = EmbeddingStore::new(Arc::new(MemoryTable::new()), 2);
    store
        .add(vec![
            record("a", vec![1.0, 0.0], "A"),
            record("b", vec![0.5, 0.5], "A"),
            record("c", vec![0.0, 1.0], "A"),
        ])
        .await
        .unwrap();

    assert!(store
        .similarity_search_with_score(&[1.0, 0.0], 0)
        .await
        .unwrap()
        .is_empty());

    let all = store
        .similarity_search_with_score(&[1.0, 0.0], 100)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|pair| pair[0].1 >= pair[1].1));
}

#[tokio::test]
async fn add_then_list_then_delete_unknown_source() {
    let store = EmbeddingStore::new(Arc::new(MemoryTable::new()), 3);
    store
        .add(vec![VectorRecord::new("only", vec![1.0, 2.0, 3.0])])
        .await
        .unwrap();

    let ids = store.list_ids().await.unwrap();
    assert_eq!(ids.len(), 1);

    store.delete_by_source("A").await.unwrap();
    assert_eq!(store.list_ids().await.unwrap(), ids);
}

#[tokio::test]
async fn stored_short_vector_is_skipped_not_fatal() {
    // A 2-component vector reached the table while queries use 3 components
    let table = Arc::new(MemoryTable::new());
    table
        .put(TableItem {
            id: "stale".to_string(),
            content: "old chunk".to_string(),
            vector: vec!["1".to_string(), "0".to_string()],
            source: String::new(),
            page: 0,
            metadata: String::new(),
        })
        .await
        .unwrap();

    let store = EmbeddingStore::new(table, 3);
    store
        .add(vec![VectorRecord::new("fresh", vec![0.0, 0.0, 1.0])])
        .await
        .unwrap();

    let hits = store
        .similarity_search_with_score(&[0.0, 0.0, 1.0], 10)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.content, "fresh");
    assert_eq!(store.metrics().skipped_dimension, 1);
}

#[tokio::test]
async fn corrupt_item_is_skipped_and_counted() {
    let table = Arc::new(MemoryTable::new());
    table
        .put(TableItem {
            id: "broken".to_string(),
            content: "bad".to_string(),
            vector: vec!["one point five".to_string(), "0".to_string()],
            source: String::new(),
            page: 0,
            metadata: String::new(),
        })
        .await
        .unwrap();

    let store = EmbeddingStore::new(table, 2);
    store
        .add(vec![VectorRecord::new("good", vec![1.0, 0.0])])
        .await
        .unwrap();

    let hits = store
        .similarity_search_with_score(&[1.0, 0.0], 10)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.content, "good");
    assert_eq!(store.metrics().corrupt_records, 1);
}

#[tokio::test]
async fn json_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("embeddings.json");

    {
        let table = Arc::new(JsonFileTable::open(&path).await.unwrap());
        let store = EmbeddingStore::new(table, 2);
        store
            .add(vec![
                record("persisted", vec![1.0, 0.0], "doc1").with_id("keep"),
                record("doomed", vec![0.0, 1.0], "doc2").with_id("drop"),
            ])
            .await
            .unwrap();
        store.delete_by_source("doc2").await.unwrap();
    }

    let table = Arc::new(JsonFileTable::open(&path).await.unwrap());
    let store = EmbeddingStore::new(table, 2);

    assert_eq!(store.list_ids().await.unwrap(), vec!["keep"]);
    let hits = store
        .similarity_search_with_score(&[1.0, 0.0], 5)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.content, "persisted");
}
