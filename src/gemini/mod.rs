pub mod image_client;
pub mod request;
pub mod transport;

use std::sync::Arc;

use crate::config::ForgeConfig;
use crate::error::Result;
use crate::models::image::GeneratedImage;
use crate::models::settings::GenerationSettings;
use crate::storage::{FileSnapshotStore, HistoryStore, MemorySnapshotStore, SnapshotStore};

pub use image_client::ImageClient;
pub use request::{build_plan, RequestPlan};
pub use transport::{GenerateApi, HttpTransport};

/// Root client: the generation client plus an optional history store.
#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
    history: Option<Arc<HistoryStore>>,
}

impl GeminiClient {
    /// A client without history; generations are returned but not
    /// recorded.
    pub fn new(config: ForgeConfig) -> Self {
        GeminiClient {
            image_client: ImageClient::new(config.gemini),
            history: None,
        }
    }

    /// A client with a history store: file-backed under the configured
    /// directory, or in-memory when none is set.
    pub async fn with_history(config: ForgeConfig) -> Self {
        let backend: Arc<dyn SnapshotStore> = match &config.history_dir {
            Some(dir) => Arc::new(FileSnapshotStore::new(dir.clone())),
            None => Arc::new(MemorySnapshotStore::new()),
        };
        let history = HistoryStore::open(backend).await;

        GeminiClient {
            image_client: ImageClient::new(config.gemini),
            history: Some(Arc::new(history)),
        }
    }

    /// Assembles a client from pre-built parts (custom transport, shared
    /// history store).
    pub fn from_parts(image_client: ImageClient, history: Option<Arc<HistoryStore>>) -> Self {
        GeminiClient {
            image_client,
            history,
        }
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn history(&self) -> Option<&Arc<HistoryStore>> {
        self.history.as_ref()
    }

    /// Runs one generation batch, stamps the artifacts into
    /// `GeneratedImage` records, prepends them to the history when one
    /// is attached, and returns the batch.
    pub async fn generate_and_record(
        &self,
        settings: &GenerationSettings,
    ) -> Result<Vec<GeneratedImage>> {
        let artifacts = self.image_client.generate(settings).await?;

        let batch: Vec<GeneratedImage> = artifacts
            .into_iter()
            .map(|artifact| GeneratedImage::from_artifact(artifact, settings))
            .collect();

        if let Some(history) = &self.history {
            history.insert_batch(batch.clone()).await?;
        }

        log::info!("Generation complete: {} image(s)", batch.len());
        Ok(batch)
    }
}
