//! Configuration errors.

use super::error_code::{self, CxnErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Missing policy weight for role '{role}'")]
    MissingPolicyWeight { role: String },
}

impl CxnErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPolicyWeight { .. } => error_code::MISSING_POLICY,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
