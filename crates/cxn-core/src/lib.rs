//! # cxn-core
//!
//! Foundation crate for the construction annotator.
//! Defines the shared types, traits, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{AnnotatorConfig, PipelineSettings, PolicyWeights};
pub use errors::{AnnotationError, AnnotationResult, CxnErrorCode};
pub use types::{
    CompiledConstruction, ComponentKind, CxnToken, Feature, FeatureSet, Role, Sentence, Span,
};
