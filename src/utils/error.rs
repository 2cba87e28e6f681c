use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Markup scrape failed: expected {field} in {context}")]
    Scrape { field: String, context: String },

    #[error("Response format mismatch: {message}")]
    Format { message: String },

    #[error("OCR engine unavailable: {message}")]
    EngineUnavailable { message: String },

    #[error("OCR run failed: {message}")]
    Recognition { message: String },

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl NavError {
    /// Exit code for the CLI surfaces. Environment problems (missing OCR
    /// runtime) are distinguished from transport and data problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            NavError::EngineUnavailable { .. } => 3,
            NavError::Transport(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
