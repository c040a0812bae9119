use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::settings::GenerationSettings;

/// A generated image record as it lives in the current result set and
/// the persisted history. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: String,
    /// Embedded image payload reference, e.g. a `data:` URI.
    pub url: String,
    pub prompt: String,
    /// Display name of the model that produced the image.
    pub model: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
}

impl GeneratedImage {
    /// Stamps a freshly normalized artifact into a history record.
    pub fn from_artifact(artifact: ImageArtifact, settings: &GenerationSettings) -> Self {
        GeneratedImage {
            id: Uuid::new_v4().to_string(),
            url: artifact.data_uri,
            prompt: settings.prompt.clone(),
            model: settings.model.display_name().to_string(),
            timestamp: Utc::now(),
            aspect_ratio: settings.aspect_ratio.clone(),
        }
    }
}

/// A normalized image payload straight out of a provider response,
/// before it is stamped with an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArtifact {
    pub data_uri: String,
    pub mime_type: String,
}

impl ImageArtifact {
    pub fn new(mime_type: impl Into<String>, base64_data: &str) -> Self {
        let mime_type = mime_type.into();
        ImageArtifact {
            data_uri: format!("data:{};base64,{}", mime_type, base64_data),
            mime_type,
        }
    }
}

// --- generateContent wire shapes (multimodal family) ---

#[derive(Debug, Default, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct InlineData {
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl ContentResponse {
    /// The first inline image-typed part of the first candidate, if any.
    /// Text parts and non-image attachments are skipped.
    pub fn first_image(&self) -> Option<ImageArtifact> {
        for candidate in &self.candidates {
            for part in &candidate.content.parts {
                if let Part::Inline { inline_data } = part {
                    if inline_data.mime_type.starts_with("image/") {
                        return Some(ImageArtifact::new(
                            inline_data.mime_type.clone(),
                            &inline_data.data,
                        ));
                    }
                }
            }
        }
        None
    }
}

// --- predict wire shapes (Imagen family) ---

#[derive(Debug, Default, Deserialize)]
pub struct ImagenResponse {
    #[serde(default)]
    pub predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
pub struct ImagenPrediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: String,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

impl ImagenResponse {
    /// Every returned image, in provider order.
    pub fn into_artifacts(self) -> Vec<ImageArtifact> {
        self.predictions
            .into_iter()
            .map(|p| {
                ImageArtifact::new(
                    p.mime_type.unwrap_or_else(|| "image/jpeg".to_string()),
                    &p.bytes_base64_encoded,
                )
            })
            .collect()
    }
}
