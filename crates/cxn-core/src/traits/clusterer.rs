//! Point clustering contract.

use crate::errors::ModelError;

/// Groups 2-D points into `k` clusters.
pub trait PointClusterer: Send + Sync {
    /// One label in `0..k` per point, in input order.
    fn fit_predict(&self, points: &[(f64, f64)], k: usize) -> Result<Vec<usize>, ModelError>;
}
