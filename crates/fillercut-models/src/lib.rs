//! Shared data models for the fillercut pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Transcript words with per-word timestamps
//! - Filler detections as reported by the classifier
//! - Generic time ranges (filler ranges and keep segments)
//! - Timecode parsing/formatting (`HH:MM:SS.mmm` <-> seconds)

pub mod detection;
pub mod range;
pub mod timecode;
pub mod word;

// Re-export common types
pub use detection::{Detection, DetectionKind};
pub use range::TimeRange;
pub use timecode::{format_timecode, parse_timecode, TimecodeError, TimecodeResult};
pub use word::Word;
