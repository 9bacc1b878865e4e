//! Phase 5: Growth sections of the fitted curve.
//!
//! A growth section is a maximal run over which the fitted score never
//! strictly decreases. Its chars are split into clauses; clauses at least as
//! long as the constant count that hold every constant literal are retained,
//! and their chars get a `deriv` of 1.2 (positive policy) or 0.2.

use std::ops::Range;

use cxn_core::constants::{DERIV_NON_POSITIVE_WEIGHT, DERIV_POSITIVE_WEIGHT};
use cxn_core::types::{CompiledConstruction, FeatureSet};

use crate::algorithms::clauses::split_clauses;

/// Maximal non-decreasing runs of `fitted`, covering every position.
pub fn growth_sections(fitted: &[f64]) -> Vec<Range<usize>> {
    if fitted.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut start = 0;
    for i in 1..fitted.len() {
        if fitted[i] < fitted[i - 1] {
            sections.push(start..i);
            start = i;
        }
    }
    sections.push(start..fitted.len());
    sections
}

/// Char ranges of growth-section clauses that carry the whole construction.
pub fn retained_segments(
    features: &FeatureSet,
    fitted: &[f64],
    construction: &CompiledConstruction,
) -> Vec<Range<usize>> {
    let chars: Vec<char> = features.iter().map(|f| f.value).collect();
    let min_len = construction.constants().len();

    growth_sections(fitted)
        .into_iter()
        .flat_map(|section| split_clauses(&chars[section.clone()], section.start))
        .filter(|clause| clause.range.len() >= min_len)
        .filter(|clause| construction.contains_all_constants(&clause.text))
        .map(|clause| clause.range)
        .collect()
}

/// Re-weight `deriv` inside retained growth segments.
pub fn adjust_derivatives(
    features: &FeatureSet,
    fitted: &[f64],
    construction: &CompiledConstruction,
) -> FeatureSet {
    let mut adjusted = features.clone();
    for segment in retained_segments(features, fitted, construction) {
        for position in segment {
            if let Some(f) = adjusted.get_mut(position) {
                f.deriv = if f.policy > 0.0 {
                    DERIV_POSITIVE_WEIGHT
                } else {
                    DERIV_NON_POSITIVE_WEIGHT
                };
            }
        }
    }
    adjusted
}
