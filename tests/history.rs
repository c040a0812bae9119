use std::sync::Arc;

use pixelforge::models::{GeneratedImage, GenerationSettings, ImageArtifact};
use pixelforge::{
    FileSnapshotStore, HistoryStore, MemorySnapshotStore, SnapshotStore, HISTORY_KEY,
};

fn image(id: &str) -> GeneratedImage {
    let mut img = GeneratedImage::from_artifact(
        ImageArtifact::new("image/png", "QUJD"),
        &GenerationSettings::new("test prompt"),
    );
    img.id = id.to_string();
    img
}

fn batch(ids: &[&str]) -> Vec<GeneratedImage> {
    ids.iter().map(|id| image(id)).collect()
}

fn ids(store: &HistoryStore) -> Vec<String> {
    store.items().into_iter().map(|img| img.id).collect()
}

#[tokio::test]
async fn insert_batch_prepends_newest_first() {
    let store = HistoryStore::open(Arc::new(MemorySnapshotStore::new())).await;

    store.insert_batch(batch(&["b1", "b2"])).await.unwrap();
    store.insert_batch(batch(&["c1", "c2"])).await.unwrap();

    // C ++ B: the new batch sits ahead of everything, internal order kept.
    assert_eq!(ids(&store), vec!["c1", "c2", "b1", "b2"]);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let store = HistoryStore::open(Arc::new(MemorySnapshotStore::new())).await;
    store.insert_batch(batch(&["a", "b", "c"])).await.unwrap();

    assert!(store.remove("b").await.unwrap());
    assert_eq!(ids(&store), vec!["a", "c"]);

    // Second removal and unknown ids leave the store unchanged.
    assert!(!store.remove("b").await.unwrap());
    assert!(!store.remove("nope").await.unwrap());
    assert_eq!(ids(&store), vec!["a", "c"]);
}

#[tokio::test]
async fn clear_empties_the_store_and_the_snapshot() {
    let backend = Arc::new(MemorySnapshotStore::new());
    let store = HistoryStore::open(backend.clone()).await;
    store.insert_batch(batch(&["a", "b"])).await.unwrap();

    store.clear().await.unwrap();
    assert!(store.is_empty());

    let reopened = HistoryStore::open(backend).await;
    assert!(reopened.is_empty());
}

#[tokio::test]
async fn snapshot_round_trips_through_the_backend() {
    let backend = Arc::new(MemorySnapshotStore::new());
    let store = HistoryStore::open(backend.clone()).await;
    store.insert_batch(batch(&["b1", "b2"])).await.unwrap();
    store.insert_batch(batch(&["c1"])).await.unwrap();

    let reopened = HistoryStore::open(backend).await;
    assert_eq!(reopened.items(), store.items());
    assert_eq!(ids(&reopened), vec!["c1", "b1", "b2"]);
}

#[tokio::test]
async fn corrupt_snapshot_degrades_to_empty_history() {
    let backend = Arc::new(MemorySnapshotStore::new());
    backend.set(HISTORY_KEY, b"{ not json").await.unwrap();

    let store = HistoryStore::open(backend.clone()).await;
    assert!(store.is_empty());

    // The store stays usable after the degrade.
    store.insert_batch(batch(&["a"])).await.unwrap();
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn lookup_and_navigation() {
    let store = HistoryStore::open(Arc::new(MemorySnapshotStore::new())).await;
    store
        .insert_batch(batch(&["newest", "middle", "oldest"]))
        .await
        .unwrap();

    assert!(store.contains("middle"));
    assert_eq!(store.get("middle").unwrap().id, "middle");
    assert!(store.get("nope").is_none());

    // next walks toward older entries, prev toward newer ones.
    assert_eq!(store.next_id("newest").as_deref(), Some("middle"));
    assert_eq!(store.next_id("middle").as_deref(), Some("oldest"));
    assert_eq!(store.next_id("oldest"), None);
    assert_eq!(store.prev_id("oldest").as_deref(), Some("middle"));
    assert_eq!(store.prev_id("newest"), None);
}

#[tokio::test]
async fn file_store_round_trip_and_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path());

    assert_eq!(store.get("absent").await.unwrap(), None);

    store.set(HISTORY_KEY, b"[1,2,3]").await.unwrap();
    assert_eq!(
        store.get(HISTORY_KEY).await.unwrap(),
        Some(b"[1,2,3]".to_vec())
    );

    store.remove(HISTORY_KEY).await.unwrap();
    assert_eq!(store.get(HISTORY_KEY).await.unwrap(), None);
    // Removing an absent key is not an error.
    store.remove(HISTORY_KEY).await.unwrap();
}

#[tokio::test]
async fn file_backed_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let backend = Arc::new(FileSnapshotStore::new(dir.path()));
        let store = HistoryStore::open(backend).await;
        store.insert_batch(batch(&["a", "b"])).await.unwrap();
    }

    let backend = Arc::new(FileSnapshotStore::new(dir.path()));
    let reopened = HistoryStore::open(backend).await;
    assert_eq!(ids(&reopened), vec!["a", "b"]);
}
