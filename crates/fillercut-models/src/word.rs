//! Transcript word model.

use serde::{Deserialize, Serialize};

/// A single transcribed word with its timestamps.
///
/// Produced by the transcription engine (whisper JSON, `segments[].words[]`,
/// unknown fields ignored). Timestamps are seconds from the start of the
/// input and are assumed, not guaranteed, to be non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The word text as transcribed
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Word {
    /// Create a new word.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}
