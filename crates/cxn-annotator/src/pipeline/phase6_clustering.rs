//! Phase 6: Clustering of `(position, composite)` points into 3 groups.

use cxn_core::config::ScoreVariant;
use cxn_core::constants::CLUSTER_COUNT;
use cxn_core::errors::ModelError;
use cxn_core::traits::PointClusterer;
use cxn_core::types::FeatureSet;

use super::composite;

/// One cluster label per position, each below `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment {
    pub labels: Vec<usize>,
    pub k: usize,
}

/// Recompute the composite and cluster the sentence's points.
///
/// The clusterer's output is checked: one label per point, each in `0..k`.
pub fn cluster_positions(
    features: &FeatureSet,
    variant: ScoreVariant,
    clusterer: &dyn PointClusterer,
) -> Result<ClusterAssignment, ModelError> {
    let points: Vec<(f64, f64)> = features
        .iter()
        .enumerate()
        .map(|(i, f)| (i as f64, composite(f, variant)))
        .collect();

    let labels = clusterer.fit_predict(&points, CLUSTER_COUNT)?;
    if labels.len() != points.len() {
        return Err(ModelError::ClusterFailed(format!(
            "expected {} labels, got {}",
            points.len(),
            labels.len()
        )));
    }
    if let Some(&bad) = labels.iter().find(|&&l| l >= CLUSTER_COUNT) {
        return Err(ModelError::ClusterFailed(format!(
            "label {bad} outside 0..{CLUSTER_COUNT}"
        )));
    }

    Ok(ClusterAssignment {
        labels,
        k: CLUSTER_COUNT,
    })
}
