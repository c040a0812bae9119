pub mod file;
pub mod memory;
pub mod traits;

use std::sync::{Arc, Mutex};

use crate::error::{ForgeError, Result};
use crate::models::image::GeneratedImage;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;
pub use traits::SnapshotStore;

/// Storage key the serialized history lives under.
pub const HISTORY_KEY: &str = "IMAGE_HISTORY";

/// The persisted, newest-first ledger of every generated image. All
/// mutations write the full snapshot back through the backend; the lock
/// is only held to mutate the in-memory list, never across an await.
pub struct HistoryStore {
    backend: Arc<dyn SnapshotStore>,
    entries: Mutex<Vec<GeneratedImage>>,
}

impl HistoryStore {
    /// Loads the snapshot once at startup. Corrupt or absent data leaves
    /// the history empty; it is never a fatal error.
    pub async fn open(backend: Arc<dyn SnapshotStore>) -> Self {
        let entries = match backend.get(HISTORY_KEY).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<GeneratedImage>>(&bytes) {
                Ok(entries) => {
                    log::debug!("Loaded {} history entries", entries.len());
                    entries
                }
                Err(e) => {
                    log::warn!("Discarding corrupt history snapshot: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read history snapshot: {}", e);
                Vec::new()
            }
        };

        HistoryStore {
            backend,
            entries: Mutex::new(entries),
        }
    }

    /// Prepends a batch ahead of all existing entries, keeping the
    /// batch's internal order, and persists.
    pub async fn insert_batch(&self, batch: Vec<GeneratedImage>) -> Result<()> {
        let snapshot = {
            let mut entries = self.entries.lock().unwrap();
            entries.splice(0..0, batch);
            entries.clone()
        };
        self.persist(&snapshot).await
    }

    /// Deletes the entry with that id if present. Idempotent; persists
    /// only when something was actually removed. Returns whether the
    /// entry existed.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let snapshot = {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|img| img.id != id);
            if entries.len() == before {
                None
            } else {
                Some(entries.clone())
            }
        };

        match snapshot {
            Some(snapshot) => {
                self.persist(&snapshot).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap().clear();
        self.persist(&[]).await
    }

    pub fn get(&self, id: &str) -> Option<GeneratedImage> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|img| img.id == id)
            .cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.lock().unwrap().iter().any(|img| img.id == id)
    }

    /// Snapshot of the full list, newest first.
    pub fn items(&self) -> Vec<GeneratedImage> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// The entry one step older than `current`, or `None` at the oldest
    /// entry (the end of the list is terminal, not cyclic).
    pub fn next_id(&self, current: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        let index = entries.iter().position(|img| img.id == current)?;
        entries.get(index + 1).map(|img| img.id.clone())
    }

    /// The entry one step newer than `current`, or `None` at the newest.
    pub fn prev_id(&self, current: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        let index = entries.iter().position(|img| img.id == current)?;
        if index == 0 {
            return None;
        }
        entries.get(index - 1).map(|img| img.id.clone())
    }

    async fn persist(&self, entries: &[GeneratedImage]) -> Result<()> {
        let bytes = serde_json::to_vec(entries)
            .map_err(|e| ForgeError::Serialization(format!("history snapshot: {}", e)))?;
        self.backend.set(HISTORY_KEY, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::GenerationSettings;
    use crate::models::ImageArtifact;

    fn image(id: &str) -> GeneratedImage {
        let mut img = GeneratedImage::from_artifact(
            ImageArtifact::new("image/png", "QUJD"),
            &GenerationSettings::new("test prompt"),
        );
        img.id = id.to_string();
        img
    }

    async fn store_with(ids: &[&str]) -> HistoryStore {
        let store = HistoryStore::open(Arc::new(MemorySnapshotStore::new())).await;
        store
            .insert_batch(ids.iter().map(|id| image(id)).collect())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_navigation_terminal_ends() {
        let store = store_with(&["newest", "middle", "oldest"]).await;

        assert_eq!(store.next_id("newest").as_deref(), Some("middle"));
        assert_eq!(store.prev_id("oldest").as_deref(), Some("middle"));
        // No wraparound at either end.
        assert_eq!(store.prev_id("newest"), None);
        assert_eq!(store.next_id("oldest"), None);
        assert_eq!(store.next_id("unknown"), None);
    }
}
