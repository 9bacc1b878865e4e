//! Resolved runtime settings threaded through every pipeline call.

use super::{PolicyWeights, ScoreVariant};

/// How the polynomial degree of the curve fit is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeStrategy {
    /// `ceil(len / component_count)`, capped at `max`.
    Adaptive { max: usize },
    /// Always this degree.
    Fixed(usize),
}

impl DegreeStrategy {
    /// Degree for a sentence of `len` characters and a form of `components` components.
    pub fn degree_for(&self, len: usize, components: usize) -> usize {
        match *self {
            Self::Adaptive { max } => len.div_ceil(components.max(1)).min(max),
            Self::Fixed(degree) => degree,
        }
    }
}

/// Mixture-model settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSettings {
    pub seed: u64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

/// Immutable settings for one annotator, produced by `AnnotatorConfig::resolve`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub window: usize,
    pub matcher_window: usize,
    pub weights: PolicyWeights,
    pub variant: ScoreVariant,
    pub regex_fallback: bool,
    pub degree: DegreeStrategy,
    pub cluster: ClusterSettings,
}
