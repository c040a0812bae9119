use serde_json::{json, Value};

use crate::models::catalog::{ModelFamily, ModelId};
use crate::models::settings::GenerationSettings;

/// One generation invocation, described as provider-ready payloads.
///
/// The two provider families take different wire shapes: multimodal
/// models produce one image per `generateContent` call, so a batch of N
/// images becomes N payloads; Imagen models take the whole batch as a
/// single `predict` call with a sample count.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPlan {
    PerImage { model: ModelId, payloads: Vec<Value> },
    Single { model: ModelId, payload: Value },
}

impl RequestPlan {
    pub fn model(&self) -> ModelId {
        match self {
            RequestPlan::PerImage { model, .. } => *model,
            RequestPlan::Single { model, .. } => *model,
        }
    }
}

/// Maps validated settings to a request plan. Pure data transformation;
/// no network I/O happens here.
pub fn build_plan(settings: &GenerationSettings) -> RequestPlan {
    match settings.model.family() {
        ModelFamily::Multimodal => RequestPlan::PerImage {
            model: settings.model,
            payloads: (0..settings.image_count)
                .map(|_| content_payload(settings))
                .collect(),
        },
        ModelFamily::Imagen => RequestPlan::Single {
            model: settings.model,
            payload: imagen_payload(settings),
        },
    }
}

fn content_payload(settings: &GenerationSettings) -> Value {
    let final_prompt = if settings.negative_prompt.is_empty() {
        settings.prompt.clone()
    } else {
        format!("{}. Avoid: {}", settings.prompt, settings.negative_prompt)
    };

    let mut generation_config = json!({
        "responseModalities": ["TEXT", "IMAGE"],
        "imageConfig": {
            "aspectRatio": settings.aspect_ratio,
        }
    });
    if let Some(seed) = settings.seed {
        // The same seed goes on every payload of the batch; whether the
        // provider varies identical-seed parallel calls is unspecified
        // upstream, and we do not second-guess it here.
        generation_config["seed"] = json!(seed);
    }

    json!({
        "contents": [{
            "parts": [{"text": final_prompt}]
        }],
        "generationConfig": generation_config,
    })
}

fn imagen_payload(settings: &GenerationSettings) -> Value {
    let final_prompt = if settings.negative_prompt.is_empty() {
        settings.prompt.clone()
    } else {
        format!(
            "{}. Negative prompt: {}",
            settings.prompt, settings.negative_prompt
        )
    };

    let mut parameters = json!({
        "sampleCount": settings.image_count,
        "aspectRatio": settings.aspect_ratio,
        "outputMimeType": "image/jpeg",
        "guidanceScale": settings.guidance_scale,
    });
    if let Some(seed) = settings.seed {
        parameters["seed"] = json!(seed);
    }

    json!({
        "instances": [{"prompt": final_prompt}],
        "parameters": parameters,
    })
}
