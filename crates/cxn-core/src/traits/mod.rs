//! Collaborator contracts consumed by the pipeline.

pub mod cancellation;
pub mod clusterer;
pub mod curve_fitter;
pub mod segmenter;

pub use cancellation::{Cancellable, CancellationToken};
pub use clusterer::PointClusterer;
pub use curve_fitter::{CurveFitter, Predictor};
pub use segmenter::Segmenter;
