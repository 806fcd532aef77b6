//! Declarative trim/concat filter graph.
//!
//! The graph is a structured value, decoupled from FFmpeg's textual
//! `filter_complex` dialect: compilation from keep segments is pure and
//! testable, and serialization to the backend syntax is a separate step.
//!
//! Video and audio are trimmed independently from the same source with
//! identical time boundaries; concatenating both in the same segment order
//! is what preserves sync. Reordering the operations shuffles footage.

use fillercut_models::TimeRange;

use crate::error::{MediaError, MediaResult};

/// A single operation in the edit graph.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Cut a video segment from the source and reset its timestamps.
    TrimVideo {
        start: f64,
        duration: f64,
        label: String,
    },
    /// Cut an audio segment from the source and reset its timestamps.
    TrimAudio {
        start: f64,
        duration: f64,
        label: String,
    },
    /// Concatenate trimmed video segments, in order, into one stream.
    ConcatVideo {
        inputs: Vec<String>,
        label: String,
    },
    /// Concatenate trimmed audio segments, in order, into one stream.
    ConcatAudio {
        inputs: Vec<String>,
        label: String,
    },
}

/// An ordered non-linear edit graph over a single input file.
#[derive(Debug, Clone)]
pub struct FilterGraph {
    ops: Vec<FilterOp>,
}

impl FilterGraph {
    /// Label of the concatenated video stream.
    pub const VIDEO_OUT: &'static str = "outv";
    /// Label of the concatenated audio stream.
    pub const AUDIO_OUT: &'static str = "outa";

    /// Compile keep segments into a trim/concat graph.
    ///
    /// Graph order equals keep-segment order; segments are expected in
    /// chronological order. Zero segments is rejected: a concat of zero
    /// inputs is invalid, and callers should have aborted earlier with
    /// "nothing to keep".
    pub fn compile(keep_segments: &[TimeRange]) -> MediaResult<Self> {
        if keep_segments.is_empty() {
            return Err(MediaError::NothingToKeep);
        }

        let mut ops = Vec::with_capacity(keep_segments.len() * 2 + 2);

        for (i, segment) in keep_segments.iter().enumerate() {
            ops.push(FilterOp::TrimVideo {
                start: segment.start,
                duration: segment.duration(),
                label: format!("v{}", i),
            });
            ops.push(FilterOp::TrimAudio {
                start: segment.start,
                duration: segment.duration(),
                label: format!("a{}", i),
            });
        }

        ops.push(FilterOp::ConcatVideo {
            inputs: (0..keep_segments.len()).map(|i| format!("v{}", i)).collect(),
            label: Self::VIDEO_OUT.to_string(),
        });
        ops.push(FilterOp::ConcatAudio {
            inputs: (0..keep_segments.len()).map(|i| format!("a{}", i)).collect(),
            label: Self::AUDIO_OUT.to_string(),
        });

        Ok(Self { ops })
    }

    /// The operations in graph order.
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// Serialize to FFmpeg `filter_complex` syntax.
    pub fn render(&self) -> String {
        self.ops
            .iter()
            .map(render_op)
            .collect::<Vec<_>>()
            .join(";")
    }
}

fn render_op(op: &FilterOp) -> String {
    match op {
        FilterOp::TrimVideo {
            start,
            duration,
            label,
        } => format!(
            "[0:v]trim=start={:.3}:duration={:.3},setpts=PTS-STARTPTS[{}]",
            start, duration, label
        ),
        FilterOp::TrimAudio {
            start,
            duration,
            label,
        } => format!(
            "[0:a]atrim=start={:.3}:duration={:.3},asetpts=PTS-STARTPTS[{}]",
            start, duration, label
        ),
        FilterOp::ConcatVideo { inputs, label } => format!(
            "{}concat=n={}:v=1:a=0[{}]",
            render_labels(inputs),
            inputs.len(),
            label
        ),
        FilterOp::ConcatAudio { inputs, label } => format!(
            "{}concat=n={}:v=0:a=1[{}]",
            render_labels(inputs),
            inputs.len(),
            label
        ),
    }
}

fn render_labels(labels: &[String]) -> String {
    labels.iter().map(|l| format!("[{}]", l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_shape_and_order() {
        let keep = vec![TimeRange::new(0.0, 2.0), TimeRange::new(4.0, 10.0)];
        let graph = FilterGraph::compile(&keep).unwrap();
        let ops = graph.ops();

        assert_eq!(ops.len(), 6);
        assert!(matches!(&ops[0], FilterOp::TrimVideo { label, .. } if label == "v0"));
        assert!(matches!(&ops[1], FilterOp::TrimAudio { label, .. } if label == "a0"));
        assert!(matches!(&ops[2], FilterOp::TrimVideo { label, .. } if label == "v1"));
        assert!(matches!(&ops[3], FilterOp::TrimAudio { label, .. } if label == "a1"));

        match &ops[4] {
            FilterOp::ConcatVideo { inputs, label } => {
                assert_eq!(inputs, &["v0".to_string(), "v1".to_string()]);
                assert_eq!(label, FilterGraph::VIDEO_OUT);
            }
            other => panic!("expected video concat, got {:?}", other),
        }
        match &ops[5] {
            FilterOp::ConcatAudio { inputs, label } => {
                assert_eq!(inputs, &["a0".to_string(), "a1".to_string()]);
                assert_eq!(label, FilterGraph::AUDIO_OUT);
            }
            other => panic!("expected audio concat, got {:?}", other),
        }
    }

    #[test]
    fn test_render_filter_complex() {
        let keep = vec![TimeRange::new(0.0, 2.0), TimeRange::new(4.0, 10.0)];
        let graph = FilterGraph::compile(&keep).unwrap();

        assert_eq!(
            graph.render(),
            "[0:v]trim=start=0.000:duration=2.000,setpts=PTS-STARTPTS[v0];\
             [0:a]atrim=start=0.000:duration=2.000,asetpts=PTS-STARTPTS[a0];\
             [0:v]trim=start=4.000:duration=6.000,setpts=PTS-STARTPTS[v1];\
             [0:a]atrim=start=4.000:duration=6.000,asetpts=PTS-STARTPTS[a1];\
             [v0][v1]concat=n=2:v=1:a=0[outv];\
             [a0][a1]concat=n=2:v=0:a=1[outa]"
        );
    }

    #[test]
    fn test_single_segment() {
        let graph = FilterGraph::compile(&[TimeRange::new(1.5, 3.0)]).unwrap();
        let rendered = graph.render();
        assert!(rendered.contains("trim=start=1.500:duration=1.500"));
        assert!(rendered.contains("[v0]concat=n=1:v=1:a=0[outv]"));
        assert!(rendered.contains("[a0]concat=n=1:v=0:a=1[outa]"));
    }

    #[test]
    fn test_segment_order_is_preserved_verbatim() {
        // The compiler does not reorder; order in equals order out.
        let keep = vec![TimeRange::new(4.0, 10.0), TimeRange::new(0.0, 2.0)];
        let graph = FilterGraph::compile(&keep).unwrap();
        assert!(matches!(
            &graph.ops()[0],
            FilterOp::TrimVideo { start, .. } if (*start - 4.0).abs() < 0.001
        ));
    }

    #[test]
    fn test_zero_segments_rejected() {
        assert!(matches!(
            FilterGraph::compile(&[]),
            Err(MediaError::NothingToKeep)
        ));
    }
}
