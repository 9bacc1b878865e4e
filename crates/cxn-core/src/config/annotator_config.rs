//! Top-level annotator configuration with layered resolution.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    ClusterSettings, ClusteringConfig, ConstructionConfig, DegreeStrategy, FittingConfig,
    PipelineConfig, PipelineSettings, PolicyWeights, ScoreVariant, SegmenterConfig,
};
use crate::errors::ConfigError;

/// Name of the project config file looked up by [`AnnotatorConfig::load`].
pub const PROJECT_CONFIG_FILE: &str = "cxn.toml";

/// Environment variables read by [`AnnotatorConfig::load`].
pub const ENV_OVERRIDES: [&str; 6] = [
    "CXN_WINDOW",
    "CXN_PIPELINE_VARIANT",
    "CXN_PIPELINE_REGEX_FALLBACK",
    "CXN_FITTING_MAX_DEGREE",
    "CXN_CLUSTER_SEED",
    "CXN_SEGMENTER_USERDICT",
];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CXN_*`)
/// 2. Project config (`cxn.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnnotatorConfig {
    pub construction: ConstructionConfig,
    /// `role → weight`. Empty means defaults; otherwise every role is required.
    pub policies: HashMap<String, f64>,
    pub pipeline: PipelineConfig,
    pub fitting: FittingConfig,
    pub clustering: ClusteringConfig,
    pub segmenter: SegmenterConfig,
}

impl AnnotatorConfig {
    /// Load configuration: defaults, then `cxn.toml` in `root` if present,
    /// then `CXN_*` environment overrides. The result is validated.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load a specific config file over the defaults, without env overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        Self::merge_toml_file(&mut config, path)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &AnnotatorConfig) -> Result<(), ConfigError> {
        if config.construction.window == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "construction.window".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.construction.matcher_window == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "construction.matcher_window".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.fitting.max_degree == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "fitting.max_degree".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.clustering.max_iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "clustering.max_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(tolerance) = config.clustering.tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "clustering.tolerance".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        PolicyWeights::from_map(&config.policies)?;
        Ok(())
    }

    /// Validate and resolve into the immutable settings the pipeline consumes.
    pub fn resolve(&self) -> Result<PipelineSettings, ConfigError> {
        Self::validate(self)?;

        let degree = match self.fitting.fixed_degree {
            Some(d) => DegreeStrategy::Fixed(d),
            None => DegreeStrategy::Adaptive {
                max: self.fitting.effective_max_degree(),
            },
        };

        Ok(PipelineSettings {
            window: self.construction.effective_window(),
            matcher_window: self.construction.effective_matcher_window(),
            weights: PolicyWeights::from_map(&self.policies)?,
            variant: self.pipeline.effective_variant(),
            regex_fallback: self.pipeline.effective_regex_fallback(),
            degree,
            cluster: ClusterSettings {
                seed: self.clustering.effective_seed(),
                max_iterations: self.clustering.effective_max_iterations(),
                tolerance: self.clustering.effective_tolerance(),
            },
        })
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut AnnotatorConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: AnnotatorConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    /// A non-empty policy table replaces the base table as a whole.
    fn merge(base: &mut AnnotatorConfig, other: &AnnotatorConfig) {
        if other.construction.window.is_some() {
            base.construction.window = other.construction.window;
        }
        if other.construction.matcher_window.is_some() {
            base.construction.matcher_window = other.construction.matcher_window;
        }

        if !other.policies.is_empty() {
            base.policies = other.policies.clone();
        }

        if other.pipeline.variant.is_some() {
            base.pipeline.variant = other.pipeline.variant;
        }
        if other.pipeline.regex_fallback.is_some() {
            base.pipeline.regex_fallback = other.pipeline.regex_fallback;
        }

        if other.fitting.fixed_degree.is_some() {
            base.fitting.fixed_degree = other.fitting.fixed_degree;
        }
        if other.fitting.max_degree.is_some() {
            base.fitting.max_degree = other.fitting.max_degree;
        }

        if other.clustering.seed.is_some() {
            base.clustering.seed = other.clustering.seed;
        }
        if other.clustering.max_iterations.is_some() {
            base.clustering.max_iterations = other.clustering.max_iterations;
        }
        if other.clustering.tolerance.is_some() {
            base.clustering.tolerance = other.clustering.tolerance;
        }

        if other.segmenter.userdict.is_some() {
            base.segmenter.userdict = other.segmenter.userdict.clone();
        }
        if other.segmenter.unknown_tag.is_some() {
            base.segmenter.unknown_tag = other.segmenter.unknown_tag.clone();
        }
    }

    /// Apply environment variable overrides. Unparseable values are logged and skipped.
    fn apply_env_overrides(config: &mut AnnotatorConfig) {
        if let Ok(val) = std::env::var("CXN_WINDOW") {
            match val.parse::<usize>() {
                Ok(v) => config.construction.window = Some(v),
                Err(_) => warn!(var = "CXN_WINDOW", value = %val, "ignoring unparseable override"),
            }
        }
        if let Ok(val) = std::env::var("CXN_PIPELINE_VARIANT") {
            match ScoreVariant::parse_str(&val) {
                Some(v) => config.pipeline.variant = Some(v),
                None => warn!(
                    var = "CXN_PIPELINE_VARIANT",
                    value = %val,
                    "ignoring unparseable override"
                ),
            }
        }
        if let Ok(val) = std::env::var("CXN_PIPELINE_REGEX_FALLBACK") {
            match val.parse::<bool>() {
                Ok(v) => config.pipeline.regex_fallback = Some(v),
                Err(_) => warn!(
                    var = "CXN_PIPELINE_REGEX_FALLBACK",
                    value = %val,
                    "ignoring unparseable override"
                ),
            }
        }
        if let Ok(val) = std::env::var("CXN_FITTING_MAX_DEGREE") {
            match val.parse::<usize>() {
                Ok(v) => config.fitting.max_degree = Some(v),
                Err(_) => warn!(
                    var = "CXN_FITTING_MAX_DEGREE",
                    value = %val,
                    "ignoring unparseable override"
                ),
            }
        }
        if let Ok(val) = std::env::var("CXN_CLUSTER_SEED") {
            match val.parse::<u64>() {
                Ok(v) => config.clustering.seed = Some(v),
                Err(_) => warn!(
                    var = "CXN_CLUSTER_SEED",
                    value = %val,
                    "ignoring unparseable override"
                ),
            }
        }
        if let Ok(val) = std::env::var("CXN_SEGMENTER_USERDICT") {
            config.segmenter.userdict = Some(val.into());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
