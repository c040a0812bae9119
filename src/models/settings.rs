use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};
use crate::models::catalog::{aspect_ratio_option, ModelId};

pub const MAX_PROMPT_LEN: usize = 1000;
pub const MAX_IMAGE_COUNT: u8 = 4;
pub const DEFAULT_GUIDANCE_SCALE: f32 = 5.0;

/// User-facing generation settings. Held in memory and mutated by the
/// presentation layer; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub prompt: String,
    pub negative_prompt: String,
    pub model: ModelId,
    pub aspect_ratio: String,
    pub image_count: u8,
    pub seed: Option<i64>,
    pub guidance_scale: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        GenerationSettings {
            prompt: String::new(),
            negative_prompt: String::new(),
            model: ModelId::Gemini25FlashImage,
            aspect_ratio: "1:1".to_string(),
            image_count: 1,
            seed: None,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }
}

impl GenerationSettings {
    pub fn new(prompt: impl Into<String>) -> Self {
        GenerationSettings {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = model;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    pub fn with_image_count(mut self, count: u8) -> Self {
        self.image_count = count;
        self
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = negative_prompt.into();
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_guidance_scale(mut self, guidance_scale: f32) -> Self {
        self.guidance_scale = guidance_scale;
        self
    }

    /// Checked before any network call is issued.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ForgeError::Validation("Please enter a prompt first".into()));
        }
        if self.prompt.chars().count() > MAX_PROMPT_LEN {
            return Err(ForgeError::Validation(format!(
                "Prompt exceeds {} characters",
                MAX_PROMPT_LEN
            )));
        }
        if self.image_count < 1 || self.image_count > MAX_IMAGE_COUNT {
            return Err(ForgeError::Validation(format!(
                "Image count must be between 1 and {}",
                MAX_IMAGE_COUNT
            )));
        }
        if aspect_ratio_option(&self.aspect_ratio).is_none() {
            return Err(ForgeError::Validation(format!(
                "Unknown aspect ratio: {}",
                self.aspect_ratio
            )));
        }
        if !(0.0..=20.0).contains(&self.guidance_scale) {
            return Err(ForgeError::Validation(
                "Guidance scale must be between 0 and 20".into(),
            ));
        }
        Ok(())
    }
}
