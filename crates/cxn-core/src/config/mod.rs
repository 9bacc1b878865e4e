//! Configuration system for the annotator.
//! TOML-based, layered resolution: env > project file > defaults.

pub mod annotator_config;
pub mod construction_config;
pub mod model_config;
pub mod pipeline_config;
pub mod policy_config;
pub mod segmenter_config;
pub mod settings;

pub use annotator_config::AnnotatorConfig;
pub use construction_config::ConstructionConfig;
pub use model_config::{ClusteringConfig, FittingConfig};
pub use pipeline_config::{PipelineConfig, ScoreVariant};
pub use policy_config::PolicyWeights;
pub use segmenter_config::SegmenterConfig;
pub use settings::{ClusterSettings, DegreeStrategy, PipelineSettings};
