//! Transcription via whisper_timestamped.
//!
//! The engine is treated as a black box: it is invoked as a subprocess and
//! writes a word-level JSON artifact under the transcripts directory, which
//! is kept on disk for later inspection. Any engine failure or unexpected
//! artifact structure is fatal for the file being processed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::process::Command;
use tracing::info;

use fillercut_models::Word;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};

/// Whisper JSON artifact structure (only the fields we read).
#[derive(Debug, Deserialize)]
struct WhisperTranscript {
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    #[serde(default)]
    words: Vec<Word>,
}

/// Transcribe an input file, returning its word sequence.
pub async fn transcribe_with_whisper(
    input: &Path,
    config: &PipelineConfig,
) -> PipelineResult<Vec<Word>> {
    which::which("whisper_timestamped").map_err(|_| {
        PipelineError::transcription_failed("whisper_timestamped not found in PATH")
    })?;

    tokio::fs::create_dir_all(&config.transcripts_dir).await?;

    let artifact = transcript_artifact_path(&config.transcripts_dir, input).ok_or_else(|| {
        PipelineError::transcription_failed(format!(
            "input path has no usable file name: {}",
            input.display()
        ))
    })?;

    info!(
        input = %input.display(),
        model = %config.whisper_model,
        "Transcribing with whisper_timestamped"
    );

    let output = Command::new("whisper_timestamped")
        .arg(input)
        .arg("--output_dir")
        .arg(&config.transcripts_dir)
        .args(["--output_format", "json", "--model"])
        .arg(&config.whisper_model)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::transcription_failed(format!(
            "whisper_timestamped exited with {:?}: {}",
            output.status.code(),
            stderr.trim().lines().last().unwrap_or("unknown error")
        )));
    }

    if !artifact.exists() {
        return Err(PipelineError::transcription_failed(format!(
            "expected transcript artifact not found at {}",
            artifact.display()
        )));
    }

    load_words(&artifact).await
}

/// Path of the JSON artifact whisper writes for `input`:
/// `{transcripts_dir}/{stem}.{ext}.words.json`.
pub fn transcript_artifact_path(transcripts_dir: &Path, input: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?.to_str()?;
    let ext = input.extension()?.to_str()?;
    Some(transcripts_dir.join(format!("{}.{}.words.json", stem, ext)))
}

/// Load a whisper artifact and flatten `segments[].words`.
pub async fn load_words(path: &Path) -> PipelineResult<Vec<Word>> {
    let raw = tokio::fs::read_to_string(path).await?;

    let transcript: WhisperTranscript = serde_json::from_str(&raw).map_err(|e| {
        PipelineError::transcription_failed(format!("unexpected whisper JSON structure: {}", e))
    })?;

    let words: Vec<Word> = transcript
        .segments
        .into_iter()
        .flat_map(|s| s.words)
        .collect();

    if words.is_empty() {
        return Err(PipelineError::transcription_failed(
            "transcript contains no words",
        ));
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_artifact_path() {
        let path = transcript_artifact_path(Path::new("transcripts"), Path::new("clips/talk.mp4"))
            .unwrap();
        assert_eq!(path, Path::new("transcripts/talk.mp4.words.json"));
    }

    #[test]
    fn test_transcript_artifact_path_requires_extension() {
        assert!(transcript_artifact_path(Path::new("transcripts"), Path::new("talk")).is_none());
    }

    #[tokio::test]
    async fn test_load_words_flattens_segments() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("talk.mp4.words.json");
        tokio::fs::write(
            &artifact,
            r#"{
                "text": "hello world again",
                "segments": [
                    {
                        "id": 0,
                        "words": [
                            { "text": "hello", "start": 0.5, "end": 0.9, "confidence": 0.98 },
                            { "text": "world", "start": 1.0, "end": 1.4, "confidence": 0.95 }
                        ]
                    },
                    {
                        "id": 1,
                        "words": [
                            { "text": "again", "start": 2.0, "end": 2.5, "confidence": 0.91 }
                        ]
                    }
                ]
            }"#,
        )
        .await
        .unwrap();

        let words = load_words(&artifact).await.unwrap();

        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text, "hello");
        assert_eq!(words[2].text, "again");
        assert!((words[2].end - 2.5).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_load_words_rejects_unexpected_structure() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("bad.mp4.words.json");
        tokio::fs::write(&artifact, r#"{ "not_segments": [] }"#).await.unwrap();

        let result = load_words(&artifact).await;
        assert!(matches!(
            result,
            Err(PipelineError::TranscriptionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_load_words_rejects_empty_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("empty.mp4.words.json");
        tokio::fs::write(&artifact, r#"{ "segments": [] }"#).await.unwrap();

        let result = load_words(&artifact).await;
        assert!(matches!(
            result,
            Err(PipelineError::TranscriptionFailed(_))
        ));
    }
}
