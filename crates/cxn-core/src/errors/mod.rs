//! Error handling for the annotator.
//! One error enum per subsystem, `thiserror` only.

pub mod annotation_error;
pub mod config_error;
pub mod construction_error;
pub mod error_code;
pub mod model_error;
pub mod segment_error;

pub use annotation_error::{AnnotationError, AnnotationResult};
pub use config_error::ConfigError;
pub use construction_error::ConstructionError;
pub use error_code::CxnErrorCode;
pub use model_error::ModelError;
pub use segment_error::SegmentError;
