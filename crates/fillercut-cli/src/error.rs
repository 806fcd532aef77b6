//! Pipeline error types.

use thiserror::Error;

use fillercut_media::MediaError;
use fillercut_models::TimecodeError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Classification failed: {0}")]
    ClassificationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No filler sections found to remove")]
    NoFillerDetected,

    #[error("Nothing to keep: all content was classified as filler")]
    NothingToKeep,

    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn transcription_failed(msg: impl Into<String>) -> Self {
        Self::TranscriptionFailed(msg.into())
    }

    pub fn classification_failed(msg: impl Into<String>) -> Self {
        Self::ClassificationFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
