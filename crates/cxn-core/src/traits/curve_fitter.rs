//! Curve fitting contract.

use crate::errors::ModelError;

/// A fitted model.
pub trait Predictor: Send {
    /// Smoothed estimate at each `x`.
    fn predict(&self, x: &[f64]) -> Vec<f64>;
}

/// Fits a smooth curve of a given polynomial degree through `(x, y)` points.
pub trait CurveFitter: Send + Sync {
    fn fit(&self, x: &[f64], y: &[f64], degree: usize) -> Result<Box<dyn Predictor>, ModelError>;

    /// Minimum number of points a fit of `degree` needs.
    fn min_points(&self, degree: usize) -> usize {
        degree + 1
    }
}
