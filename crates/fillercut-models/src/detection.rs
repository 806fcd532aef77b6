//! Filler detection models.

use serde::{Deserialize, Serialize};

use crate::range::TimeRange;
use crate::timecode::{parse_timecode, TimecodeResult};

/// Kind of removable speech event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionKind {
    /// Filler word ("um", "uh", "like", ...)
    #[serde(rename = "Filler Word")]
    FillerWord,
    /// Silence or non-verbal delay between words
    Pause,
    /// Cough or throat clear
    Cough,
}

/// A candidate interval to remove, as reported by the classifier.
///
/// Timecodes stay `HH:MM:SS.mmm` strings on the wire and are converted to
/// seconds at the aggregation boundary. Classifier output is untrusted:
/// `end >= start` is expected but not guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Kind of event
    #[serde(rename = "type")]
    pub kind: DetectionKind,

    /// Start timecode (HH:MM:SS.mmm)
    pub start: String,

    /// End timecode (HH:MM:SS.mmm)
    pub end: String,

    /// The offending word, when the classifier names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

impl Detection {
    /// Convert the wire timecodes into a seconds-based range.
    pub fn time_range(&self) -> TimecodeResult<TimeRange> {
        Ok(TimeRange::new(
            parse_timecode(&self.start)?,
            parse_timecode(&self.end)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_classifier_output() {
        let json = r#"[
            { "type": "Filler Word", "start": "00:00:05.120", "end": "00:00:05.500", "word": "um" },
            { "type": "Pause", "start": "00:00:10.000", "end": "00:00:11.000" }
        ]"#;
        let detections: Vec<Detection> = serde_json::from_str(json).unwrap();

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].kind, DetectionKind::FillerWord);
        assert_eq!(detections[0].word.as_deref(), Some("um"));
        assert_eq!(detections[1].kind, DetectionKind::Pause);
        assert!(detections[1].word.is_none());
    }

    #[test]
    fn test_time_range_conversion() {
        let detection = Detection {
            kind: DetectionKind::Pause,
            start: "00:00:10.000".to_string(),
            end: "00:00:11.500".to_string(),
            word: None,
        };

        let range = detection.time_range().unwrap();
        assert!((range.start - 10.0).abs() < 0.001);
        assert!((range.end - 11.5).abs() < 0.001);
    }

    #[test]
    fn test_time_range_rejects_malformed() {
        let detection = Detection {
            kind: DetectionKind::Cough,
            start: "not a timecode".to_string(),
            end: "00:00:01.000".to_string(),
            word: None,
        };
        assert!(detection.time_range().is_err());
    }
}
