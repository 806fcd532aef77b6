//! Keep-segment synthesis.
//!
//! Converts the filler ranges reported by the classifier into the
//! complementary set of segments to retain. Classifier output is untrusted:
//! ranges may arrive unsorted, overlapping, nested, zero-length, or past the
//! end of the video, and the sweep must stay correct for all of them. A
//! merge that ignored overlap would silently duplicate or skip footage.

use std::cmp::Ordering;

use fillercut_models::TimeRange;

/// Compute the segments to keep: `[0, total_duration]` minus the union of
/// all filler ranges.
///
/// Output segments are disjoint, chronologically ordered, and bounded by
/// `total_duration`. Output order is final video order. An empty result
/// means everything was classified as filler; callers must treat that as
/// "nothing to keep" and abort instead of rendering.
pub fn synthesize_keep_segments(
    filler_ranges: &[TimeRange],
    total_duration: f64,
) -> Vec<TimeRange> {
    let mut fillers: Vec<TimeRange> = filler_ranges.to_vec();
    fillers.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

    let mut keep = Vec::new();
    let mut cursor = 0.0_f64;

    for filler in &fillers {
        let start = filler.start.max(0.0);
        // Clamp untrusted bounds: end never precedes start and never
        // exceeds the probed duration.
        let end = filler.end.max(start).min(total_duration);

        if cursor < start {
            keep.push(TimeRange::new(cursor, start.min(total_duration)));
        }

        // max() keeps the cursor monotonic when a shorter filler range is
        // nested inside an earlier one.
        cursor = cursor.max(end);
    }

    if cursor < total_duration {
        keep.push(TimeRange::new(cursor, total_duration));
    }

    keep
}

/// Total duration covered by the given ranges, in seconds.
///
/// Reported to the user as "time saved"; overlapping ranges count twice,
/// matching what the detections literally claim.
pub fn time_saved(ranges: &[TimeRange]) -> f64 {
    ranges.iter().map(TimeRange::duration).sum()
}
