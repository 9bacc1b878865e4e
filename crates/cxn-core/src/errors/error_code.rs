//! CxnErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable code string
/// that batch reports and host bindings can match on.
pub trait CxnErrorCode {
    /// Returns the error code string (e.g., "SEGMENT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MISSING_POLICY: &str = "MISSING_POLICY";
pub const CONSTRUCTION_ERROR: &str = "CONSTRUCTION_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const SEGMENT_ERROR: &str = "SEGMENT_ERROR";
pub const SEGMENT_MISALIGNED: &str = "SEGMENT_MISALIGNED";
pub const FIT_ERROR: &str = "FIT_ERROR";
pub const CLUSTER_ERROR: &str = "CLUSTER_ERROR";
