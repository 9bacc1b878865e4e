//! Curve fitting and clustering configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CLUSTER_MAX_ITERATIONS, DEFAULT_CLUSTER_SEED, DEFAULT_CLUSTER_TOLERANCE,
    DEFAULT_MAX_DEGREE,
};

/// Polynomial curve fitting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FittingConfig {
    /// Fixed polynomial degree. When unset the degree adapts to sentence length.
    pub fixed_degree: Option<usize>,
    /// Cap on the adaptive degree. Default: 8.
    pub max_degree: Option<usize>,
}

impl FittingConfig {
    pub fn effective_max_degree(&self) -> usize {
        self.max_degree.unwrap_or(DEFAULT_MAX_DEGREE)
    }
}

/// Gaussian mixture clustering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Seed for initialisation. Default: 42.
    pub seed: Option<u64>,
    /// EM iteration cap. Default: 100.
    pub max_iterations: Option<usize>,
    /// Convergence tolerance on mean log-likelihood. Default: 1e-6.
    pub tolerance: Option<f64>,
}

impl ClusteringConfig {
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_CLUSTER_SEED)
    }

    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations
            .unwrap_or(DEFAULT_CLUSTER_MAX_ITERATIONS)
    }

    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_CLUSTER_TOLERANCE)
    }
}
