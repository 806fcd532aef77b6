//! OpenAI client for filler classification.
//!
//! Sends each transcript chunk to the chat-completions API and parses the
//! returned detection array. The response is untrusted input: a chunk whose
//! response cannot be parsed degrades to an empty detection list so one bad
//! chunk never aborts the file.

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fillercut_models::{Detection, Word};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    api_base: String,
    api_key: String,
    model: String,
    client: Client,
}

/// Chat-completions request.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat-completions response (only the fields we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a new client from pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            api_base: config.openai_api_base.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            client: Client::new(),
        }
    }

    /// Classify one transcript chunk, returning its filler detections.
    ///
    /// Transport and API errors propagate to the caller (fatal for the
    /// file); a response without a parseable detection array yields an
    /// empty list.
    pub async fn analyze_chunk(
        &self,
        index: usize,
        chunk: &[Word],
    ) -> PipelineResult<Vec<Detection>> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a speech pattern analyzer.".to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(chunk),
                },
            ],
            temperature: 0.2,
            max_completion_tokens: 1024,
        };

        let url = format!("{}/chat/completions", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::classification_failed(format!("OpenAI request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PipelineError::classification_failed(format!(
                "OpenAI API returned {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            PipelineError::classification_failed(format!(
                "Failed to parse OpenAI response: {}",
                e
            ))
        })?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or_default();

        let detections = parse_detections(index, content);
        info!(
            chunk = index + 1,
            detections = detections.len(),
            "Chunk analyzed"
        );

        Ok(detections)
    }
}

/// Format a chunk as one word per line with its timestamps in seconds.
fn format_chunk(chunk: &[Word]) -> String {
    chunk
        .iter()
        .map(|w| format!("- \"{}\" at {:.3}–{:.3}", w.text, w.start, w.end))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the classification prompt for a chunk.
fn build_prompt(chunk: &[Word]) -> String {
    format!(
        r#"You're an expert at analyzing speech patterns. Given a list of words with timestamps, identify:

- Filler Words: "um", "uh", "like", "you know", etc.
- Pauses: any silence or non-verbal delay > 0.5s between words
- Coughs: any word that sounds like a cough or throat clear

Respond in this JSON format:
[
  {{ "type": "Filler Word", "start": "00:00:05.120", "end": "00:00:05.500", "word": "um" }},
  {{ "type": "Pause", "start": "00:00:10.000", "end": "00:00:11.000" }}
]

important:
	- The start and end times are in the format HH:MM:SS.sss

Only return real detections. Here's the transcript:

{}
"#,
        format_chunk(chunk)
    )
}

/// Extract the first JSON array from the response text and parse it.
fn parse_detections(index: usize, content: &str) -> Vec<Detection> {
    let array = Regex::new(r"(?s)\[.*\]")
        .expect("valid regex")
        .find(content);

    let Some(json) = array else {
        warn!(chunk = index + 1, "No JSON array in classification response");
        return Vec::new();
    };

    match serde_json::from_str(json.as_str()) {
        Ok(detections) => detections,
        Err(e) => {
            warn!(
                chunk = index + 1,
                error = %e,
                "Failed to parse detections JSON"
            );
            Vec::new()
        }
    }
}
