use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::{ForgeError, Result};
use crate::storage::traits::SnapshotStore;

/// Snapshot store keeping one JSON file per key under a directory. The
/// local-disk analog of browser local storage.
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSnapshotStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ForgeError::Storage(format!("create {}: {}", self.dir.display(), e)))
    }
}

fn read_error(path: &Path, e: std::io::Error) -> ForgeError {
    ForgeError::Storage(format!("read {}: {}", path.display(), e))
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(&path, e)),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.ensure_dir().await?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .await
            .map_err(|e| ForgeError::Storage(format!("write {}: {}", path.display(), e)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ForgeError::Storage(format!(
                "remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
