use std::sync::Arc;

use futures::future::join_all;

use crate::config::GeminiConfig;
use crate::error::{ForgeError, Result};
use crate::gemini::request::{build_plan, RequestPlan};
use crate::gemini::transport::{GenerateApi, HttpTransport};
use crate::models::catalog::ModelId;
use crate::models::image::ImageArtifact;
use crate::models::settings::GenerationSettings;

/// Executes generation plans against the provider and normalizes the two
/// response shapes into one ordered artifact list.
#[derive(Clone)]
pub struct ImageClient {
    api: Arc<dyn GenerateApi>,
}

impl ImageClient {
    pub fn new(config: GeminiConfig) -> Self {
        ImageClient {
            api: Arc::new(HttpTransport::new(config)),
        }
    }

    /// Swaps the transport, e.g. for a scripted fake in tests.
    pub fn with_api(api: Arc<dyn GenerateApi>) -> Self {
        ImageClient { api }
    }

    pub fn has_credential(&self) -> bool {
        self.api.has_credential()
    }

    /// Runs one generation batch. Returns a non-empty ordered artifact
    /// list or fails; a partial multimodal batch counts as success.
    pub async fn generate(&self, settings: &GenerationSettings) -> Result<Vec<ImageArtifact>> {
        settings.validate()?;

        if !self.api.has_credential() {
            return Err(ForgeError::CredentialMissing);
        }

        let plan = build_plan(settings);
        log::info!(
            "Generating {} image(s) with model: {}",
            settings.image_count,
            plan.model().as_str()
        );

        match plan {
            RequestPlan::PerImage { model, payloads } => {
                self.generate_per_image(model, &payloads).await
            }
            RequestPlan::Single { model, payload } => {
                self.generate_single(model, &payload).await
            }
        }
    }

    /// Fires all calls concurrently and joins on the full set. Artifact
    /// order follows request order, not completion order, so slot N of
    /// the result always corresponds to request N.
    async fn generate_per_image(
        &self,
        model: ModelId,
        payloads: &[serde_json::Value],
    ) -> Result<Vec<ImageArtifact>> {
        let calls = payloads
            .iter()
            .map(|payload| self.api.generate_content(model.as_str(), payload));
        let results = join_all(calls).await;

        let mut artifacts = Vec::new();
        let mut first_failure: Option<ForgeError> = None;
        let mut any_success = false;

        for (slot, result) in results.into_iter().enumerate() {
            match result {
                Ok(response) => {
                    any_success = true;
                    match response.first_image() {
                        Some(artifact) => artifacts.push(artifact),
                        None => log::warn!("Request {} returned no image part", slot),
                    }
                }
                Err(e) => {
                    log::warn!("Request {} failed: {}", slot, e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        if artifacts.is_empty() {
            return Err(match first_failure {
                // Every call failed: surface the classified failure.
                Some(failure) if !any_success => classify_failure(model, failure),
                // At least one call succeeded but produced nothing.
                _ => ForgeError::EmptyResult,
            });
        }

        Ok(artifacts)
    }

    async fn generate_single(
        &self,
        model: ModelId,
        payload: &serde_json::Value,
    ) -> Result<Vec<ImageArtifact>> {
        let response = self
            .api
            .generate_images(model.as_str(), payload)
            .await
            .map_err(|e| classify_failure(model, e))?;

        let artifacts = response.into_artifacts();
        if artifacts.is_empty() {
            return Err(ForgeError::EmptyResult);
        }

        Ok(artifacts)
    }
}

/// Maps a raw provider failure onto the user-facing taxonomy: not-found
/// signals become `ModelUnavailable` for the requested model, everything
/// else keeps its original message as `GenerationFailed`.
fn classify_failure(model: ModelId, error: ForgeError) -> ForgeError {
    if error.is_not_found() {
        return ForgeError::ModelUnavailable {
            model: model.as_str().to_string(),
        };
    }
    match error {
        ForgeError::Provider { message, .. } => ForgeError::GenerationFailed(message),
        other => other,
    }
}
