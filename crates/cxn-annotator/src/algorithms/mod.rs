//! Numeric and text algorithms backing the pipeline phases.

pub mod clauses;
pub mod gaussian_mixture;
pub mod polynomial;

pub use gaussian_mixture::GaussianMixture;
pub use polynomial::{PolynomialCurve, PolynomialFitter};
