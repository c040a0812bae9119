use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use pixelforge::gemini::{GenerateApi, ImageClient};
use pixelforge::models::{
    ContentResponse, GeneratedImage, GenerationSettings, ImagenResponse, ImageArtifact, ModelId,
    SAMPLE_PROMPTS,
};
use pixelforge::{GeminiClient, HistoryStore, MemorySnapshotStore, Result, Studio};

/// Always returns one PNG per multimodal call and two JPEGs per Imagen
/// call; enough to drive controller-level flows.
struct AlwaysImages;

#[async_trait]
impl GenerateApi for AlwaysImages {
    fn has_credential(&self) -> bool {
        true
    }

    async fn generate_content(&self, _model: &str, _payload: &Value) -> Result<ContentResponse> {
        Ok(serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "QUJD"}}]
                }
            }]
        }))
        .unwrap())
    }

    async fn generate_images(&self, _model: &str, _payload: &Value) -> Result<ImagenResponse> {
        Ok(serde_json::from_value(json!({
            "predictions": [
                {"bytesBase64Encoded": "QQ=="},
                {"bytesBase64Encoded": "Qg=="}
            ]
        }))
        .unwrap())
    }
}

async fn studio() -> Studio {
    let history = HistoryStore::open(Arc::new(MemorySnapshotStore::new())).await;
    let client = GeminiClient::from_parts(
        ImageClient::with_api(Arc::new(AlwaysImages)),
        Some(Arc::new(history)),
    );
    Studio::new(client)
}

#[tokio::test]
async fn generate_replaces_current_and_accumulates_history() {
    let mut studio = studio().await;
    studio.settings_mut().prompt = "a red cube".to_string();
    studio.settings_mut().image_count = 2;

    let first = studio.generate().await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(studio.current_images(), &first[..]);

    let second = studio.generate().await.unwrap();
    assert_eq!(studio.current_images(), &second[..]);

    // History holds both batches, newest batch first.
    let history = studio.history().unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history.items()[0].id, second[0].id);
    assert_eq!(history.items()[2].id, first[0].id);
}

#[tokio::test]
async fn delete_retracts_from_history_current_and_selection() {
    let mut studio = studio().await;
    studio.settings_mut().prompt = "a red cube".to_string();
    studio.settings_mut().image_count = 2;

    let batch = studio.generate().await.unwrap();
    let victim = batch[0].id.clone();
    assert!(studio.select(&victim));

    studio.delete_image(&victim).await.unwrap();

    assert!(!studio.history().unwrap().contains(&victim));
    assert!(studio.current_images().iter().all(|img| img.id != victim));
    assert_eq!(studio.selected_id(), None);

    // Deleting again is a harmless no-op.
    studio.delete_image(&victim).await.unwrap();
}

#[tokio::test]
async fn delete_of_other_image_keeps_selection() {
    let mut studio = studio().await;
    studio.settings_mut().prompt = "a red cube".to_string();
    studio.settings_mut().image_count = 2;

    let batch = studio.generate().await.unwrap();
    assert!(studio.select(&batch[0].id));
    studio.delete_image(&batch[1].id).await.unwrap();

    assert_eq!(studio.selected_id(), Some(batch[0].id.as_str()));
}

#[tokio::test]
async fn clear_history_empties_everything() {
    let mut studio = studio().await;
    studio.settings_mut().prompt = "a red cube".to_string();

    let batch = studio.generate().await.unwrap();
    studio.select(&batch[0].id);

    studio.clear_history().await.unwrap();

    assert!(studio.history().unwrap().is_empty());
    assert!(studio.current_images().is_empty());
    assert_eq!(studio.selected_id(), None);
}

#[tokio::test]
async fn selection_navigation_stops_at_the_ends() {
    let mut studio = studio().await;
    studio.settings_mut().prompt = "a red cube".to_string();
    studio.settings_mut().image_count = 3;
    studio.generate().await.unwrap();

    let ids: Vec<String> = studio
        .history()
        .unwrap()
        .items()
        .into_iter()
        .map(|img| img.id)
        .collect();

    // Start on the newest entry; previous must not wrap.
    studio.select(&ids[0]);
    studio.previous_image();
    assert_eq!(studio.selected_id(), Some(ids[0].as_str()));

    studio.next_image();
    assert_eq!(studio.selected_id(), Some(ids[1].as_str()));
    studio.next_image();
    assert_eq!(studio.selected_id(), Some(ids[2].as_str()));

    // Oldest entry: next must not wrap.
    studio.next_image();
    assert_eq!(studio.selected_id(), Some(ids[2].as_str()));

    studio.previous_image();
    assert_eq!(studio.selected_id(), Some(ids[1].as_str()));
}

#[tokio::test]
async fn select_refuses_unknown_ids() {
    let mut studio = studio().await;
    assert!(!studio.select("nope"));
    assert_eq!(studio.selected_id(), None);
    assert!(studio.selected_image().is_none());
}

#[tokio::test]
async fn remix_restores_settings_from_a_record() {
    let mut studio = studio().await;

    let source = GenerationSettings::new("an ancient library")
        .with_model(ModelId::Imagen3)
        .with_aspect_ratio("16:9");
    let record = GeneratedImage::from_artifact(ImageArtifact::new("image/png", "QUJD"), &source);

    studio.settings_mut().image_count = 4;
    studio.settings_mut().seed = Some(42);
    studio.remix(&record);

    let settings = studio.settings();
    assert_eq!(settings.prompt, "an ancient library");
    assert_eq!(settings.model, ModelId::Imagen3);
    assert_eq!(settings.aspect_ratio, "16:9");
    assert_eq!(settings.image_count, 1);
    assert_eq!(settings.seed, None);
}

#[tokio::test]
async fn remix_falls_back_to_the_default_model() {
    let mut studio = studio().await;

    let mut record = GeneratedImage::from_artifact(
        ImageArtifact::new("image/png", "QUJD"),
        &GenerationSettings::new("a crystal palace"),
    );
    record.model = "Some Retired Model".to_string();

    studio.remix(&record);
    assert_eq!(studio.settings().model, ModelId::Gemini25FlashImage);
}

#[tokio::test]
async fn surprise_me_picks_a_sample_prompt() {
    let mut studio = studio().await;
    let prompt = studio.surprise_me().to_string();

    assert!(SAMPLE_PROMPTS.contains(&prompt.as_str()));
    assert_eq!(studio.settings().prompt, prompt);
}
