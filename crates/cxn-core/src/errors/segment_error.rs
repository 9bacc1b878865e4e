//! Segmentation errors.

use super::error_code::{self, CxnErrorCode};

/// Errors reported by a segmenter, or by the pipeline when the segmenter's
/// output cannot be projected back onto the sentence.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("Segmenter failed: {0}")]
    Failed(String),

    #[error("Segmented words do not reassemble the sentence at char {position}")]
    Misaligned { position: usize },

    #[error("Failed to read user dictionary {path}: {message}")]
    Dictionary { path: String, message: String },
}

impl CxnErrorCode for SegmentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Misaligned { .. } => error_code::SEGMENT_MISALIGNED,
            _ => error_code::SEGMENT_ERROR,
        }
    }
}
