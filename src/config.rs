use std::env;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok();
        let base_url = env::var("GEMINI_API_BASE").ok();

        GeminiConfig { api_key, base_url }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// Top-level library configuration: provider connection plus the
/// directory the history snapshot is written to.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    pub gemini: GeminiConfig,
    pub history_dir: Option<PathBuf>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            gemini: GeminiConfig::default(),
            history_dir: None,
        }
    }
}

impl ForgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let history_dir = env::var("PIXELFORGE_HISTORY_DIR").ok().map(PathBuf::from);

        ForgeConfig {
            gemini: GeminiConfig::from_env(),
            history_dir,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.gemini.api_key = Some(api_key.into());
        self
    }

    pub fn with_history_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.history_dir = Some(dir.into());
        self
    }
}
