pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod session;
pub mod storage;

pub use config::{ForgeConfig, GeminiConfig};
pub use error::{ForgeError, Result};
pub use gemini::{GeminiClient, GenerateApi, HttpTransport, ImageClient};
pub use models::*;
pub use session::Studio;
pub use storage::{
    FileSnapshotStore, HistoryStore, MemorySnapshotStore, SnapshotStore, HISTORY_KEY,
};
