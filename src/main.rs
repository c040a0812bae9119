use base64::{engine::general_purpose, Engine as _};
use pixelforge::logger::{LogLevel, LoggerConfig};
use pixelforge::{supported_models, ForgeConfig, GeminiClient, Studio};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pixelforge::logger::init_with_config(
        LoggerConfig::development().with_level(LogLevel::Debug),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = ForgeConfig::from_env();
    if config.gemini.api_key.is_none() {
        log::warn!("⚠️  No GEMINI_API_KEY set; generation will fail until a key is selected");
    }

    log::info!("🖼️  Available image generation models:");
    for model in supported_models() {
        log::info!("  {} - {} ({})", model.id, model.name, model.badge);
    }

    let client = GeminiClient::with_history(config).await;
    let mut studio = Studio::new(client);

    studio.surprise_me();
    studio.settings_mut().image_count = 2;
    log::info!("🎨 Prompt: {}", studio.settings().prompt);

    match studio.generate().await {
        Ok(batch) => {
            log::info!("✅ Generated {} image(s)", batch.len());

            for img in &batch {
                let Some(encoded) = img.url.split("base64,").nth(1) else {
                    log::warn!("Image {} has no embedded payload", img.id);
                    continue;
                };

                let filename = format!("pixelforge-{}.png", img.id);
                match general_purpose::STANDARD.decode(encoded) {
                    Ok(bytes) => match std::fs::write(&filename, bytes) {
                        Ok(_) => log::info!("💾 Image saved to: {}", filename),
                        Err(e) => log::error!("❌ Failed to save image: {}", e),
                    },
                    Err(e) => log::error!("❌ Failed to decode base64 image: {}", e),
                }
            }
        }
        Err(e) => {
            log::error!("❌ Generation failed: {}", e);
        }
    }

    if let Some(history) = studio.history() {
        log::info!("📚 History now holds {} image(s)", history.len());
    }

    Ok(())
}
