//! Apply filler removal with a single FFmpeg pass.
//!
//! Renders the compiled filter graph into one `-filter_complex` invocation:
//! every keep segment is trimmed from the source and the pieces are
//! concatenated, so the output is produced in a single re-encode without
//! intermediate files.

use std::path::Path;

use tracing::{debug, info};

use fillercut_models::TimeRange;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filler_removal::graph::FilterGraph;

/// Re-encode `input` into `output`, retaining only the keep segments.
///
/// Segments must be the synthesizer's output: chronological, disjoint,
/// within the probed duration. An empty slice fails with
/// [`crate::MediaError::NothingToKeep`] before FFmpeg is invoked.
pub async fn remove_filler_sections(
    input: &Path,
    output: &Path,
    keep_segments: &[TimeRange],
) -> MediaResult<()> {
    let graph = FilterGraph::compile(keep_segments)?;

    debug!(
        input = %input.display(),
        output = %output.display(),
        segments = keep_segments.len(),
        "Rendering keep segments with filter graph"
    );

    let cmd = FfmpegCommand::new(input, output)
        .filter_complex(graph.render())
        .map_stream(format!("[{}]", FilterGraph::VIDEO_OUT))
        .map_stream(format!("[{}]", FilterGraph::AUDIO_OUT))
        .video_codec("libx264")
        .preset("veryfast")
        .crf(20)
        .audio_codec("aac")
        .audio_bitrate("128k");

    FfmpegRunner::new()
        .run_with_progress(&cmd, |progress| {
            debug!(
                out_time = %progress.out_time,
                speed = progress.speed,
                "Transcode progress"
            );
        })
        .await?;

    info!(
        segments = keep_segments.len(),
        output = %output.display(),
        "Filler removal render completed"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;

    #[tokio::test]
    async fn test_empty_keep_segments_rejected_before_ffmpeg() {
        let result =
            remove_filler_sections(Path::new("in.mp4"), Path::new("out.mp4"), &[]).await;
        assert!(matches!(result, Err(MediaError::NothingToKeep)));
    }
}
