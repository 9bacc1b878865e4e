//! Phase 4: Curve fitting over the composite score sequence.
//!
//! x is the char position, y the composite score. Sentences too short for the
//! requested degree skip the fit and pass the raw composite through.

use tracing::trace;

use cxn_core::config::ScoreVariant;
use cxn_core::errors::ModelError;
use cxn_core::traits::CurveFitter;
use cxn_core::types::FeatureSet;

use super::composite;

/// Smoothed composite per position.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedCurve {
    pub fitted: Vec<f64>,
    pub degree: usize,
    /// True when the raw composite was passed through.
    pub skipped: bool,
}

/// `(position, composite)` points of the sentence.
pub fn composite_curve(features: &FeatureSet, variant: ScoreVariant) -> (Vec<f64>, Vec<f64>) {
    features
        .iter()
        .enumerate()
        .map(|(i, f)| (i as f64, composite(f, variant)))
        .unzip()
}

/// Fit `fitter` at `degree` and predict every position.
pub fn fit_curve(
    features: &FeatureSet,
    variant: ScoreVariant,
    degree: usize,
    fitter: &dyn CurveFitter,
) -> Result<FittedCurve, ModelError> {
    let (x, y) = composite_curve(features, variant);

    if x.len() < fitter.min_points(degree) {
        trace!(
            points = x.len(),
            degree,
            "too few points, passing composite through"
        );
        return Ok(FittedCurve {
            fitted: y,
            degree,
            skipped: true,
        });
    }

    let fitted = fitter.fit(&x, &y, degree)?.predict(&x);
    if fitted.len() != x.len() {
        return Err(ModelError::LengthMismatch {
            x: x.len(),
            y: fitted.len(),
        });
    }

    Ok(FittedCurve {
        fitted,
        degree,
        skipped: false,
    })
}
