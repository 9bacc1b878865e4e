//! Gaussian mixture clustering of 2-D points by expectation maximisation.
//!
//! Coordinates are standardized per axis, components carry diagonal
//! covariances, and means start from a seeded k-means++ draw so a given
//! seed always yields the same labels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cxn_core::config::ClusterSettings;
use cxn_core::errors::ModelError;
use cxn_core::traits::PointClusterer;

/// Variance floor, in standardized units.
const VARIANCE_FLOOR: f64 = 1e-6;

/// Components whose effective size drops below this are left untouched in the M-step.
const MIN_COMPONENT_MASS: f64 = 1e-10;

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Reference [`PointClusterer`] backed by a diagonal Gaussian mixture.
#[derive(Debug, Clone, Copy)]
pub struct GaussianMixture {
    seed: u64,
    max_iterations: usize,
    tolerance: f64,
}

impl GaussianMixture {
    pub fn new(seed: u64, max_iterations: usize, tolerance: f64) -> Self {
        Self {
            seed,
            max_iterations,
            tolerance,
        }
    }

    pub fn from_settings(settings: &ClusterSettings) -> Self {
        Self::new(settings.seed, settings.max_iterations, settings.tolerance)
    }
}

#[derive(Debug, Clone)]
struct Component {
    weight: f64,
    mean: [f64; 2],
    variance: [f64; 2],
}

impl Component {
    fn log_density(&self, p: &[f64; 2]) -> f64 {
        let mut ll = self.weight.max(f64::MIN_POSITIVE).ln();
        for d in 0..2 {
            let diff = p[d] - self.mean[d];
            ll -= 0.5 * (LN_2PI + self.variance[d].ln() + diff * diff / self.variance[d]);
        }
        ll
    }
}

impl PointClusterer for GaussianMixture {
    fn fit_predict(&self, points: &[(f64, f64)], k: usize) -> Result<Vec<usize>, ModelError> {
        if k == 0 {
            return Err(ModelError::ClusterFailed(
                "cluster count must be at least 1".to_string(),
            ));
        }
        if let Some(index) = points
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ModelError::NonFinite { index });
        }
        if points.len() <= k {
            return Ok((0..points.len()).collect());
        }

        let data = standardize(points);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut components: Vec<Component> = init_means(&data, k, &mut rng)
            .into_iter()
            .map(|mean| Component {
                weight: 1.0 / k as f64,
                mean,
                variance: [1.0, 1.0],
            })
            .collect();

        let n = data.len();
        let mut resp = vec![vec![0.0; k]; n];
        let mut previous = f64::NEG_INFINITY;

        for _ in 0..self.max_iterations {
            let log_likelihood = expectation(&data, &components, &mut resp);
            maximization(&data, &resp, &mut components);

            if (log_likelihood - previous).abs() < self.tolerance {
                break;
            }
            previous = log_likelihood;
        }
        expectation(&data, &components, &mut resp);

        Ok(resp.iter().map(|row| argmax(row)).collect())
    }
}

/// Index of the first largest value.
fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (j, &r) in row.iter().enumerate() {
        if r > row[best] {
            best = j;
        }
    }
    best
}

/// Centre and scale each axis; constant axes are only centred.
fn standardize(points: &[(f64, f64)]) -> Vec<[f64; 2]> {
    let n = points.len() as f64;
    let columns = [
        points.iter().map(|p| p.0).collect::<Vec<_>>(),
        points.iter().map(|p| p.1).collect::<Vec<_>>(),
    ];
    let stats: Vec<(f64, f64)> = columns
        .iter()
        .map(|col| {
            let mean = col.iter().sum::<f64>() / n;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            (mean, if var > 0.0 { var.sqrt() } else { 1.0 })
        })
        .collect();

    points
        .iter()
        .map(|&(x, y)| {
            [
                (x - stats[0].0) / stats[0].1,
                (y - stats[1].0) / stats[1].1,
            ]
        })
        .collect()
}

fn squared_distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

/// k-means++ seeding.
fn init_means(data: &[[f64; 2]], k: usize, rng: &mut StdRng) -> Vec<[f64; 2]> {
    let mut means = vec![data[rng.random_range(0..data.len())]];

    while means.len() < k {
        let distances: Vec<f64> = data
            .iter()
            .map(|p| {
                means
                    .iter()
                    .map(|m| squared_distance(p, m))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = distances.iter().sum();

        let next = if total > 0.0 {
            let target = rng.random::<f64>() * total;
            let mut acc = 0.0;
            distances
                .iter()
                .position(|d| {
                    acc += d;
                    acc >= target
                })
                .unwrap_or(data.len() - 1)
        } else {
            rng.random_range(0..data.len())
        };
        means.push(data[next]);
    }

    means
}

/// Fill responsibilities; returns mean log-likelihood.
fn expectation(data: &[[f64; 2]], components: &[Component], resp: &mut [Vec<f64>]) -> f64 {
    let mut total = 0.0;
    for (p, row) in data.iter().zip(resp.iter_mut()) {
        for (r, c) in row.iter_mut().zip(components) {
            *r = c.log_density(p);
        }
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = row.iter().map(|v| (v - max).exp()).sum();
        let log_norm = max + sum.ln();
        for r in row.iter_mut() {
            *r = (*r - log_norm).exp();
        }
        total += log_norm;
    }
    total / data.len() as f64
}

fn maximization(data: &[[f64; 2]], resp: &[Vec<f64>], components: &mut [Component]) {
    let n = data.len() as f64;
    for (j, component) in components.iter_mut().enumerate() {
        let mass: f64 = resp.iter().map(|row| row[j]).sum();
        if mass < MIN_COMPONENT_MASS {
            component.weight = MIN_COMPONENT_MASS;
            continue;
        }

        let mut mean = [0.0; 2];
        for (p, row) in data.iter().zip(resp) {
            for d in 0..2 {
                mean[d] += row[j] * p[d];
            }
        }
        for m in mean.iter_mut() {
            *m /= mass;
        }

        let mut variance = [0.0; 2];
        for (p, row) in data.iter().zip(resp) {
            for d in 0..2 {
                variance[d] += row[j] * (p[d] - mean[d]).powi(2);
            }
        }
        for v in variance.iter_mut() {
            *v = *v / mass + VARIANCE_FLOOR;
        }

        component.weight = mass / n;
        component.mean = mean;
        component.variance = variance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmm() -> GaussianMixture {
        GaussianMixture::new(42, 100, 1e-6)
    }

    #[test]
    fn separates_three_obvious_groups() {
        let mut points = Vec::new();
        for i in 0..5 {
            points.push((i as f64, 0.0 + 0.01 * i as f64));
        }
        for i in 5..10 {
            points.push((i as f64, 50.0 + 0.01 * i as f64));
        }
        for i in 10..15 {
            points.push((i as f64, 100.0 + 0.01 * i as f64));
        }

        let labels = gmm().fit_predict(&points, 3).unwrap();
        assert_eq!(labels.len(), 15);
        for group in labels.chunks(5) {
            assert!(group.iter().all(|&l| l == group[0]), "{labels:?}");
        }
        assert_ne!(labels[0], labels[5]);
        assert_ne!(labels[5], labels[10]);
        assert_ne!(labels[0], labels[10]);
    }

    #[test]
    fn same_seed_same_labels() {
        let points: Vec<(f64, f64)> = (0..20)
            .map(|i| (f64::from(i), f64::from((i * 7) % 5)))
            .collect();
        let a = gmm().fit_predict(&points, 3).unwrap();
        let b = gmm().fit_predict(&points, 3).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&l| l < 3));
    }

    #[test]
    fn few_points_get_one_label_each() {
        let labels = gmm().fit_predict(&[(0.0, 1.0), (1.0, 2.0)], 3).unwrap();
        assert_eq!(labels, vec![0, 1]);
        assert!(gmm().fit_predict(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn identical_points_do_not_break_em() {
        let points = vec![(1.0, 1.0); 6];
        let labels = gmm().fit_predict(&points, 3).unwrap();
        assert_eq!(labels.len(), 6);
        assert!(labels.iter().all(|&l| l < 3));
    }

    #[test]
    fn rejects_zero_clusters_and_nan() {
        assert!(matches!(
            gmm().fit_predict(&[(0.0, 0.0)], 0),
            Err(ModelError::ClusterFailed(_))
        ));
        assert!(matches!(
            gmm().fit_predict(&[(0.0, 0.0), (f64::NAN, 1.0)], 3),
            Err(ModelError::NonFinite { index: 1 })
        ));
    }
}
