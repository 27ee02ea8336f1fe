/// Error types for the photo booth
///
/// Async jobs hand their results back to the UI as `Result<_, String>`
/// because messages must be `Clone`; everything below that boundary
/// returns `BoothError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoothError {
    /// The config file exists but could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `KioskConfig`
    #[error("invalid config JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The config parsed but holds unusable values
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The camera could not be set up
    #[error("camera error: {0}")]
    Camera(String),

    /// A camera frame could not be encoded as a still
    #[error("failed to encode still: {0}")]
    Encode(#[from] image::ImageError),

    /// A background task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, BoothError>;
