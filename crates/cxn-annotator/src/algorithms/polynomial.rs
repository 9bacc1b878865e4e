//! Least-squares polynomial fitting on standardized x.
//!
//! x is centred and scaled to unit variance before the Vandermonde
//! expansion, which keeps the normal equations well conditioned at the
//! degrees the curve phase asks for. A small ridge term on the diagonal
//! absorbs exact collinearity.

use cxn_core::errors::ModelError;
use cxn_core::traits::{CurveFitter, Predictor};

/// Ridge added to the normal-equation diagonal, relative to its mean magnitude.
const RIDGE: f64 = 1e-10;

/// Pivots below this magnitude count as singular.
const PIVOT_EPSILON: f64 = 1e-12;

/// Fitted polynomial in standardized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialCurve {
    /// Coefficients, lowest power first.
    pub coefficients: Vec<f64>,
    pub x_mean: f64,
    pub x_scale: f64,
}

impl PolynomialCurve {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate at one point (Horner).
    pub fn evaluate(&self, x: f64) -> f64 {
        let z = (x - self.x_mean) / self.x_scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * z + c)
    }
}

impl Predictor for PolynomialCurve {
    fn predict(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.evaluate(v)).collect()
    }
}

/// Reference [`CurveFitter`]: ordinary least squares over a polynomial basis.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialFitter;

impl PolynomialFitter {
    pub fn new() -> Self {
        Self
    }

    /// Fit and return the concrete curve.
    pub fn fit_curve(
        &self,
        x: &[f64],
        y: &[f64],
        degree: usize,
    ) -> Result<PolynomialCurve, ModelError> {
        if x.len() != y.len() {
            return Err(ModelError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let required = degree + 1;
        if x.len() < required {
            return Err(ModelError::InsufficientPoints {
                required,
                actual: x.len(),
            });
        }
        if let Some(index) = x.iter().chain(y.iter()).position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite {
                index: index % x.len(),
            });
        }

        let n = x.len() as f64;
        let x_mean = x.iter().sum::<f64>() / n;
        let variance = x.iter().map(|v| (v - x_mean).powi(2)).sum::<f64>() / n;
        let x_scale = if variance > 0.0 { variance.sqrt() } else { 1.0 };

        let size = required;
        // Power sums z^0 .. z^(2d) and moments y·z^0 .. y·z^d.
        let mut power_sums = vec![0.0; 2 * degree + 1];
        let mut moments = vec![0.0; size];
        for (&xi, &yi) in x.iter().zip(y) {
            let z = (xi - x_mean) / x_scale;
            let mut p = 1.0;
            for (k, sum) in power_sums.iter_mut().enumerate() {
                *sum += p;
                if k < size {
                    moments[k] += yi * p;
                }
                p *= z;
            }
        }

        let mut matrix = vec![vec![0.0; size]; size];
        for (i, row) in matrix.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = power_sums[i + j];
            }
        }
        let diagonal_mean = (0..size).map(|i| matrix[i][i]).sum::<f64>() / size as f64;
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] += RIDGE * diagonal_mean;
        }

        let coefficients = solve(matrix, moments).ok_or(ModelError::Singular { degree })?;

        Ok(PolynomialCurve {
            coefficients,
            x_mean,
            x_scale,
        })
    }
}

impl CurveFitter for PolynomialFitter {
    fn fit(&self, x: &[f64], y: &[f64], degree: usize) -> Result<Box<dyn Predictor>, ModelError> {
        Ok(Box::new(self.fit_curve(x, y, degree)?))
    }
}

/// Gaussian elimination with partial pivoting. `None` when singular.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot_row = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot_row][col].abs() < PIVOT_EPSILON {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let pivot = a[col].clone();
        let pivot_b = b[col];
        for row in col + 1..n {
            let factor = a[row][col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for (cell, &p) in a[row][col..].iter_mut().zip(&pivot[col..]) {
                *cell -= factor * p;
            }
            b[row] -= factor * pivot_b;
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * solution[k]).sum();
        solution[row] = (b[row] - tail) / a[row][row];
    }
    solution.iter().all(|v| v.is_finite()).then_some(solution)
}
