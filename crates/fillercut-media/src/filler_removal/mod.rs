//! Filler-section removal.
//!
//! This module turns the classifier's filler ranges into a rendered output
//! video in three steps:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Filler ranges│───►│ Keep-segment │───►│ Filter graph │
//! │ (untrusted)  │    │ synthesis    │    │ (trim/concat)│
//! └──────────────┘    └──────────────┘    └──────────────┘
//!                                                │
//!                                                ▼
//!                     ┌──────────────┐    ┌──────────────┐
//!                     │ Output video │◄───│ FFmpeg       │
//!                     │ (one pass)   │    │ filter_complex│
//!                     └──────────────┘    └──────────────┘
//! ```
//!
//! The keep segments are the complement of the filler ranges within the
//! probed duration. Video and audio are trimmed independently from the same
//! source using identical boundaries, which is what keeps them in sync.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fillercut_media::filler_removal::{remove_filler_sections, synthesize_keep_segments};
//!
//! let keep = synthesize_keep_segments(&filler_ranges, info.duration);
//! remove_filler_sections(&input_path, &output_path, &keep).await?;
//! ```

mod apply;
mod graph;
mod segments;

pub use apply::remove_filler_sections;
pub use graph::{FilterGraph, FilterOp};
pub use segments::{synthesize_keep_segments, time_saved};
