//! Detection aggregation.
//!
//! Merges the per-chunk classifier output with the synthetic leading-silence
//! detection into one chronologically sorted list, then converts wire
//! timecodes into seconds-based ranges at the synthesizer boundary.

use std::cmp::Ordering;

use tracing::warn;

use fillercut_models::{
    format_timecode, parse_timecode, Detection, DetectionKind, TimeRange, Word,
};

/// Synthetic trim-start detection, computed over the entire transcript
/// rather than any single chunk.
///
/// The classifier under-reports dead air at the very start of a recording,
/// so one extra Pause detection is always added: from the first word's start
/// to half a second before the last word's end. Returns `None` for an empty
/// transcript.
pub fn trim_start_detection(words: &[Word]) -> Option<Detection> {
    let first = words.first()?;
    let last = words.last()?;

    Some(Detection {
        kind: DetectionKind::Pause,
        start: format_timecode(first.start),
        end: format_timecode(last.end - 0.5),
        word: Some("trimStart".to_string()),
    })
}

/// Flatten per-chunk detections, append the synthetic detection, and sort
/// ascending by parsed start time.
///
/// The sort is stable, so equal starts keep arrival order. Chunk results may
/// arrive in any order from the bounded-concurrency pool; this sort, not
/// arrival order, determines the final sequence. Overlapping or duplicate
/// detections are left as-is; the keep-segment sweep absorbs them.
pub fn aggregate_detections(
    per_chunk: Vec<Vec<Detection>>,
    synthetic: Detection,
) -> Vec<Detection> {
    let mut detections: Vec<Detection> = per_chunk.into_iter().flatten().collect();
    detections.push(synthetic);

    detections.sort_by(|a, b| {
        let a_start = parse_timecode(&a.start).unwrap_or(f64::MAX);
        let b_start = parse_timecode(&b.start).unwrap_or(f64::MAX);
        a_start.partial_cmp(&b_start).unwrap_or(Ordering::Equal)
    });

    detections
}

/// Convert detections into seconds-based filler ranges.
///
/// A detection whose timecodes do not parse is dropped with a warning;
/// untrusted classifier output never aborts the file.
pub fn detections_to_ranges(detections: &[Detection]) -> Vec<TimeRange> {
    detections
        .iter()
        .filter_map(|detection| match detection.time_range() {
            Ok(range) => Some(range),
            Err(e) => {
                warn!(
                    error = %e,
                    word = ?detection.word,
                    "Dropping detection with malformed timecode"
                );
                None
            }
        })
        .collect()
}
