//! Curve fitting and clustering model errors.

use super::error_code::{self, CxnErrorCode};

/// Errors raised by the fitting and clustering collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Curve fit needs {required} points, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("Input length mismatch: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },

    #[error("Normal equations are singular at degree {degree}")]
    Singular { degree: usize },

    #[error("Non-finite value in model input at index {index}")]
    NonFinite { index: usize },

    #[error("Clustering failed: {0}")]
    ClusterFailed(String),
}

impl CxnErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ClusterFailed(_) => error_code::CLUSTER_ERROR,
            _ => error_code::FIT_ERROR,
        }
    }
}
