//! Phase 1: Feature construction, one default record per character.

use cxn_core::types::FeatureSet;

/// Allocate the feature arena for `text`, one entry per char in order.
pub fn build_features(text: &str) -> FeatureSet {
    FeatureSet::from_text(text)
}
