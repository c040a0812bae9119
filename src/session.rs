use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::models::catalog::{ModelId, SAMPLE_PROMPTS};
use crate::models::image::GeneratedImage;
use crate::models::settings::{GenerationSettings, DEFAULT_GUIDANCE_SCALE};
use crate::storage::HistoryStore;

/// The coordinating context for an interactive session: owns the
/// settings, the current result set and the view selection, and drives
/// the client. The presentation layer talks to this instead of holding
/// state of its own.
pub struct Studio {
    client: GeminiClient,
    settings: GenerationSettings,
    current: Vec<GeneratedImage>,
    selected: Option<String>,
}

impl Studio {
    pub fn new(client: GeminiClient) -> Self {
        Studio {
            client,
            settings: GenerationSettings::default(),
            current: Vec::new(),
            selected: None,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GenerationSettings {
        &mut self.settings
    }

    /// The batch from the most recent successful generation.
    pub fn current_images(&self) -> &[GeneratedImage] {
        &self.current
    }

    pub fn history(&self) -> Option<&Arc<HistoryStore>> {
        self.client.history()
    }

    /// Runs a generation with the current settings and replaces the
    /// current result set on success. Errors propagate to the caller for
    /// surfacing as a transient notification; a failed generation leaves
    /// the previous result set in place.
    pub async fn generate(&mut self) -> Result<Vec<GeneratedImage>> {
        let batch = self.client.generate_and_record(&self.settings).await?;
        self.current = batch.clone();
        Ok(batch)
    }

    /// Removes an image everywhere it is referenced: the history, the
    /// current result set, and the view selection.
    pub async fn delete_image(&mut self, id: &str) -> Result<()> {
        if let Some(history) = self.client.history() {
            history.remove(id).await?;
        }
        self.current.retain(|img| img.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Empties the history and the current result set. Confirmation is
    /// the presentation layer's concern; this always proceeds.
    pub async fn clear_history(&mut self) -> Result<()> {
        if let Some(history) = self.client.history() {
            history.clear().await?;
        }
        self.current.clear();
        self.selected = None;
        Ok(())
    }

    /// Points the viewer at a history entry. Unknown ids are refused.
    pub fn select(&mut self, id: &str) -> bool {
        let known = self
            .client
            .history()
            .map(|h| h.contains(id))
            .unwrap_or(false)
            || self.current.iter().any(|img| img.id == id);
        if known {
            self.selected = Some(id.to_string());
        }
        known
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_image(&self) -> Option<GeneratedImage> {
        let id = self.selected.as_deref()?;
        if let Some(history) = self.client.history() {
            history.get(id)
        } else {
            self.current.iter().find(|img| img.id == id).cloned()
        }
    }

    /// Moves the selection one step toward older entries. A no-op at the
    /// oldest entry, with no selection, or without a history store.
    pub fn next_image(&mut self) {
        if let (Some(history), Some(id)) = (self.client.history(), self.selected.as_deref()) {
            if let Some(next) = history.next_id(id) {
                self.selected = Some(next);
            }
        }
    }

    /// Moves the selection one step toward newer entries. A no-op at the
    /// newest entry.
    pub fn previous_image(&mut self) {
        if let (Some(history), Some(id)) = (self.client.history(), self.selected.as_deref()) {
            if let Some(prev) = history.prev_id(id) {
                self.selected = Some(prev);
            }
        }
    }

    /// Restores the settings from a previously generated image: its
    /// prompt and aspect ratio, the model resolved from the stored
    /// display name. The seed is dropped so the remix can vary.
    pub fn remix(&mut self, image: &GeneratedImage) {
        self.settings = GenerationSettings {
            prompt: image.prompt.clone(),
            negative_prompt: String::new(),
            model: ModelId::from_display_name(&image.model)
                .unwrap_or(ModelId::Gemini25FlashImage),
            aspect_ratio: image.aspect_ratio.clone(),
            image_count: 1,
            seed: None,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        };
        log::debug!("Settings restored from image {}", image.id);
    }

    /// Replaces the prompt with a random sample prompt.
    pub fn surprise_me(&mut self) -> &str {
        let prompt = SAMPLE_PROMPTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(SAMPLE_PROMPTS[0]);
        self.settings.prompt = prompt.to_string();
        prompt
    }
}
