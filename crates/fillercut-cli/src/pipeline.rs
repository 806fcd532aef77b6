//! Per-file orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::info;

use fillercut_media::{
    probe_video, remove_filler_sections, synthesize_keep_segments, time_saved,
};

use crate::aggregate::{aggregate_detections, detections_to_ranges, trim_start_detection};
use crate::chunk::chunk_words;
use crate::classify::OpenAiClient;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::transcribe::transcribe_with_whisper;

/// File extensions recognized as video input.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "wmv", "flv", "webm", "mkv", "m4v", "3gp", "3g2", "mts", "m2ts", "vob",
    "ogv", "dv", "asf", "rm", "rmvb", "divx", "xvid",
];

/// Whether a path exists and carries a recognized video extension.
pub fn is_video_file(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Output path for an input file: `{output_dir}/{stem}_output.{ext}`.
pub fn output_path(output_dir: &Path, input: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?.to_str()?;
    let ext = input.extension()?.to_str()?;
    Some(output_dir.join(format!("{}_output.{}", stem, ext)))
}

/// Run the full pipeline for one input file and return the output path.
///
/// Stages run strictly in order. Only chunk classification is concurrent,
/// capped at the configured in-flight limit and joined before aggregation;
/// chunk completion order does not affect the result.
pub async fn process_file(
    config: &PipelineConfig,
    client: &OpenAiClient,
    input: &Path,
) -> PipelineResult<PathBuf> {
    let video_info = probe_video(input).await?;
    info!(
        duration = video_info.duration,
        width = video_info.width,
        height = video_info.height,
        frame_rate = video_info.frame_rate,
        "Probed input"
    );

    let words = transcribe_with_whisper(input, config).await?;
    let chunks = chunk_words(&words, config.chunk_max_secs);
    info!("Loaded {} words in {} chunks", words.len(), chunks.len());

    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_requests));
    let tasks = chunks.iter().enumerate().map(|(index, chunk)| {
        let semaphore = Arc::clone(&semaphore);
        async move {
            let _permit = semaphore.acquire().await.expect("semaphore never closed");
            client.analyze_chunk(index, chunk).await
        }
    });
    let results = join_all(tasks).await;

    let mut per_chunk = Vec::with_capacity(results.len());
    for result in results {
        per_chunk.push(result?);
    }

    // The classifier doesn't always pick up dead air at the recording start
    let synthetic = trim_start_detection(&words)
        .ok_or_else(|| PipelineError::transcription_failed("transcript contains no words"))?;

    let detections = aggregate_detections(per_chunk, synthetic);
    info!("Filler detections found: {}", detections.len());

    let filler_ranges = detections_to_ranges(&detections);
    if filler_ranges.is_empty() {
        return Err(PipelineError::NoFillerDetected);
    }
    info!("Time saved: {:.1} seconds", time_saved(&filler_ranges));

    let keep_segments = synthesize_keep_segments(&filler_ranges, video_info.duration);
    if keep_segments.is_empty() {
        return Err(PipelineError::NothingToKeep);
    }
    info!(
        "Removing {} filler sections, keeping {} segments",
        filler_ranges.len(),
        keep_segments.len()
    );

    tokio::fs::create_dir_all(&config.output_dir).await?;
    let output = output_path(&config.output_dir, input).ok_or_else(|| {
        PipelineError::config_error(format!(
            "cannot derive an output name for {}",
            input.display()
        ))
    })?;

    remove_filler_sections(input, &output, &keep_segments).await?;

    Ok(output)
}
