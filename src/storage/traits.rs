use async_trait::async_trait;

use crate::error::Result;

/// Key-value persistence collaborator for serialized snapshots. The
/// history store is written against this trait so the backing medium can
/// be a file, an embedded database, or an in-memory fake in tests.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
