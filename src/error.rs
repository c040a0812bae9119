use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No API key selected. Open the key selection flow and pick a credential before generating.")]
    CredentialMissing,

    #[error("Model not found ({model}). Please check if your API key has access to this model.")]
    ModelUnavailable { model: String },

    #[error("No images were returned by the model.")]
    EmptyResult,

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Raw provider failure as seen by the transport. The generation
    /// client reclassifies this into `ModelUnavailable` or
    /// `GenerationFailed` before it reaches callers.
    #[error("Provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ForgeError {
    /// A not-found signal from the provider: an explicit 404 status or a
    /// "404" marker embedded in the error text.
    pub fn is_not_found(&self) -> bool {
        match self {
            ForgeError::Provider { status, message } => {
                *status == Some(404) || message.contains("404")
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
