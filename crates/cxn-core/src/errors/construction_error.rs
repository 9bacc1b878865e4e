//! Construction compilation errors.

use super::error_code::{self, CxnErrorCode};

/// Errors raised while compiling a construction form into a pattern.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    #[error("Construction form is empty")]
    EmptyForm,

    #[error("Empty component at index {index} in form '{form}'")]
    EmptyComponent { form: String, index: usize },

    #[error("Placeholder window must be at least 1")]
    ZeroWindow,

    #[error("Pattern '{pattern}' does not compile: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl CxnErrorCode for ConstructionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
            _ => error_code::CONSTRUCTION_ERROR,
        }
    }
}
