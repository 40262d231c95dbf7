//! ViewInsta engine: timers, the image edit client and local saves.
mod config;
mod engine;
mod gemini;
mod persist;
mod types;

pub use config::{ApiKey, ConfigError, API_KEY_VAR};
pub use engine::EngineHandle;
pub use gemini::{EditSettings, GeminiImageEditor, ImageEditor, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use persist::{ensure_output_dir, ImageSaver, PersistError};
pub use types::{
    EditError, EditErrorKind, EditedImage, EngineEvent, ImageEditRequest, RequestId, TimerKey,
};
