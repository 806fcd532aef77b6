//! Generic time interval.

use serde::{Deserialize, Serialize};

/// A time interval in seconds.
///
/// Used both for filler ranges (intervals to remove) and keep segments
/// (intervals to retain). Ranges built from classifier output carry no
/// guarantees; ranges emitted by the keep-segment synthesizer satisfy
/// `0 <= start <= end <= total_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl TimeRange {
    /// Create a new range.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of this range in seconds (zero for degenerate ranges).
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Whether this range overlaps another (shared boundaries do not count).
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        assert!((TimeRange::new(2.0, 4.5).duration() - 2.5).abs() < 0.001);
        // Degenerate input never reports negative duration
        assert!(TimeRange::new(4.0, 2.0).duration().abs() < 0.001);
    }

    #[test]
    fn test_overlaps() {
        let a = TimeRange::new(2.0, 6.0);
        assert!(a.overlaps(&TimeRange::new(4.0, 8.0)));
        assert!(a.overlaps(&TimeRange::new(3.0, 4.0)));
        assert!(!a.overlaps(&TimeRange::new(6.0, 8.0)));
        assert!(!a.overlaps(&TimeRange::new(0.0, 2.0)));
    }
}
