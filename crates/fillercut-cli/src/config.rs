//! Pipeline configuration.

use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};

/// Pipeline configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// OpenAI API key (required)
    pub openai_api_key: String,
    /// OpenAI API base URL
    pub openai_api_base: String,
    /// Chat model used for filler classification
    pub openai_model: String,
    /// Whisper model size (base, small, medium, large)
    pub whisper_model: String,
    /// Maximum transcript chunk duration sent per classification request
    pub chunk_max_secs: f64,
    /// Maximum classification requests in flight at a time
    pub max_concurrent_requests: usize,
    /// Directory for transcription artifacts
    pub transcripts_dir: PathBuf,
    /// Directory for produced videos
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| PipelineError::config_error("OPENAI_API_KEY not set"))?;

        Ok(Self {
            openai_api_key,
            openai_api_base: std::env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            whisper_model: std::env::var("WHISPER_MODEL")
                .unwrap_or_else(|_| "medium".to_string()),
            chunk_max_secs: std::env::var("FILLERCUT_CHUNK_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15.0),
            max_concurrent_requests: std::env::var("FILLERCUT_MAX_CONCURRENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            transcripts_dir: std::env::var("FILLERCUT_TRANSCRIPTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("transcripts")),
            output_dir: std::env::var("FILLERCUT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
        })
    }
}
