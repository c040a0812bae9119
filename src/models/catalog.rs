use serde::{Deserialize, Serialize};

/// The fixed set of provider models exposed by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "gemini-2.5-flash-image")]
    Gemini25FlashImage,
    #[serde(rename = "gemini-3-pro-image-preview")]
    Gemini3ProImage,
    #[serde(rename = "imagen-3.0-generate-002")]
    Imagen3,
    #[serde(rename = "imagen-3.0-generate-001")]
    Imagen3Fast,
}

/// How a model returns images.
///
/// `Multimodal` models embed at most one image inside a general
/// `generateContent` response; `Imagen` models take a sample count and
/// return a list of images from a single `predict` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Multimodal,
    Imagen,
}

impl ModelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Gemini25FlashImage => "gemini-2.5-flash-image",
            ModelId::Gemini3ProImage => "gemini-3-pro-image-preview",
            ModelId::Imagen3 => "imagen-3.0-generate-002",
            ModelId::Imagen3Fast => "imagen-3.0-generate-001",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelId::Gemini25FlashImage => "Gemini 2.5 Flash",
            ModelId::Gemini3ProImage => "Gemini 3 Pro",
            ModelId::Imagen3 => "Imagen 3",
            ModelId::Imagen3Fast => "Imagen 3 Fast",
        }
    }

    pub fn family(&self) -> ModelFamily {
        match self {
            ModelId::Gemini25FlashImage | ModelId::Gemini3ProImage => ModelFamily::Multimodal,
            ModelId::Imagen3 | ModelId::Imagen3Fast => ModelFamily::Imagen,
        }
    }

    pub fn all() -> [ModelId; 4] {
        [
            ModelId::Gemini25FlashImage,
            ModelId::Gemini3ProImage,
            ModelId::Imagen3,
            ModelId::Imagen3Fast,
        ]
    }

    /// Reverse lookup from the display name stored in history records.
    pub fn from_display_name(name: &str) -> Option<ModelId> {
        ModelId::all().into_iter().find(|m| m.display_name() == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub description: String,
}

/// Catalog of the supported models, in presentation order.
pub fn supported_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: ModelId::Gemini25FlashImage.as_str().to_string(),
            name: ModelId::Gemini25FlashImage.display_name().to_string(),
            badge: "Fast".to_string(),
            description: "Multimodal generation, one image per call".to_string(),
        },
        ModelInfo {
            id: ModelId::Gemini3ProImage.as_str().to_string(),
            name: ModelId::Gemini3ProImage.display_name().to_string(),
            badge: "Nano Banana Pro".to_string(),
            description: "Multimodal generation, one image per call".to_string(),
        },
        ModelInfo {
            id: ModelId::Imagen3.as_str().to_string(),
            name: ModelId::Imagen3.display_name().to_string(),
            badge: "High Quality".to_string(),
            description: "Dedicated image generation, up to 4 per call".to_string(),
        },
        ModelInfo {
            id: ModelId::Imagen3Fast.as_str().to_string(),
            name: ModelId::Imagen3Fast.display_name().to_string(),
            badge: "Speed".to_string(),
            description: "Dedicated image generation, up to 4 per call".to_string(),
        },
    ]
}

#[derive(Debug, Clone, Copy)]
pub struct AspectRatioOption {
    pub id: &'static str,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const ASPECT_RATIOS: [AspectRatioOption; 5] = [
    AspectRatioOption {
        id: "1:1",
        label: "Square",
        width: 1,
        height: 1,
    },
    AspectRatioOption {
        id: "16:9",
        label: "Landscape",
        width: 16,
        height: 9,
    },
    AspectRatioOption {
        id: "9:16",
        label: "Portrait",
        width: 9,
        height: 16,
    },
    AspectRatioOption {
        id: "4:3",
        label: "Standard",
        width: 4,
        height: 3,
    },
    AspectRatioOption {
        id: "3:4",
        label: "Portrait Std",
        width: 3,
        height: 4,
    },
];

pub fn aspect_ratio_option(id: &str) -> Option<&'static AspectRatioOption> {
    ASPECT_RATIOS.iter().find(|r| r.id == id)
}

pub const SAMPLE_PROMPTS: [&str; 10] = [
    "A futuristic city built inside a giant glass bubble on Mars, neon lights, 8k resolution, cinematic lighting",
    "A cute baby dragon playing with a soap bubble, vibrant colors, pixar style, detailed scales",
    "Cyberpunk street food vendor in Tokyo, rain reflections, neon signage, detailed atmosphere",
    "An ancient library floating in the clouds, magical aura, flying books, fantasy art",
    "Portrait of a robot with human emotions, rusty metal texture, soft dramatic lighting, bokeh background",
    "A minimalistic landscape of sand dunes at sunset, long shadows, pastel colors, digital art",
    "Astronaut floating in a garden of giant glowing mushrooms, deep space background, ethereal",
    "Steampunk coffee machine with intricate gears and brass pipes, steam rising, macro photography",
    "A crystal palace reflecting in a calm lake, midnight, aurora borealis in the sky",
    "Oil painting of a cozy cottage in the woods during autumn, warm light coming from windows",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_families() {
        assert_eq!(
            ModelId::Gemini25FlashImage.family(),
            ModelFamily::Multimodal
        );
        assert_eq!(ModelId::Gemini3ProImage.family(), ModelFamily::Multimodal);
        assert_eq!(ModelId::Imagen3.family(), ModelFamily::Imagen);
        assert_eq!(ModelId::Imagen3Fast.family(), ModelFamily::Imagen);
    }

    #[test]
    fn test_display_name_round_trip() {
        for model in ModelId::all() {
            assert_eq!(ModelId::from_display_name(model.display_name()), Some(model));
        }
        assert_eq!(ModelId::from_display_name("Unknown"), None);
    }

    #[test]
    fn test_aspect_ratio_lookup() {
        assert_eq!(aspect_ratio_option("16:9").unwrap().label, "Landscape");
        assert!(aspect_ratio_option("2:1").is_none());
    }
}
