use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::GeminiConfig;
use crate::error::{ForgeError, Result};
use crate::models::image::{ContentResponse, ImagenResponse};

/// The outbound seam to the provider. The generation client only ever
/// talks to this trait, so tests can script responses without a network.
#[async_trait]
pub trait GenerateApi: Send + Sync {
    /// Whether a provider credential is currently selected.
    fn has_credential(&self) -> bool;

    /// Multimodal family: one `generateContent` call, at most one image
    /// embedded in the response.
    async fn generate_content(&self, model: &str, payload: &Value) -> Result<ContentResponse>;

    /// Imagen family: one `predict` call returning a list of images.
    async fn generate_images(&self, model: &str, payload: &Value) -> Result<ImagenResponse>;
}

/// reqwest-backed transport against the Gemini REST API.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: GeminiConfig) -> Self {
        let base_url = config.base_url().to_string();
        HttpTransport {
            client: Client::new(),
            base_url,
            api_key: config.api_key,
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> Result<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ForgeError::CredentialMissing)?;
        Ok(format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, method, key
        ))
    }

    async fn post(&self, url: &str, payload: &Value) -> Result<String> {
        if let Some(key) = self.api_key.as_deref() {
            log::debug!("POST {}", url.replace(key, "***"));
        }

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ForgeError::Provider {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ForgeError::Provider {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            log::error!("Provider returned {}: {}", status, body);
            return Err(ForgeError::Provider {
                status: Some(status.as_u16()),
                message: format!("status={} body={}", status, body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl GenerateApi for HttpTransport {
    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_content(&self, model: &str, payload: &Value) -> Result<ContentResponse> {
        let url = self.endpoint(model, "generateContent")?;
        let body = self.post(&url, payload).await?;
        serde_json::from_str(&body)
            .map_err(|e| ForgeError::Serialization(format!("generateContent response: {}", e)))
    }

    async fn generate_images(&self, model: &str, payload: &Value) -> Result<ImagenResponse> {
        let url = self.endpoint(model, "predict")?;
        let body = self.post(&url, payload).await?;
        serde_json::from_str(&body)
            .map_err(|e| ForgeError::Serialization(format!("predict response: {}", e)))
    }
}
