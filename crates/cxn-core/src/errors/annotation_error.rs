//! Top-level annotation error aggregating the subsystem errors.

use super::error_code::CxnErrorCode;
use super::{ConfigError, ConstructionError, ModelError, SegmentError};

/// Errors that can occur while annotating a sentence or setting up an annotator.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),

    #[error("Segmentation error: {0}")]
    Segment(#[from] SegmentError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl CxnErrorCode for AnnotationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Construction(e) => e.error_code(),
            Self::Segment(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
        }
    }
}

/// Result alias used across the annotator.
pub type AnnotationResult<T> = Result<T, AnnotationError>;
