//! Construction compilation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MATCHER_WINDOW, DEFAULT_WINDOW};

/// Placeholder bounds for slot matching.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConstructionConfig {
    /// Max characters a slot placeholder matches in the scoring pipeline. Default: 3.
    pub window: Option<usize>,
    /// Max characters a slot placeholder matches in the regex-only matcher. Default: 10.
    pub matcher_window: Option<usize>,
}

impl ConstructionConfig {
    pub fn effective_window(&self) -> usize {
        self.window.unwrap_or(DEFAULT_WINDOW)
    }

    pub fn effective_matcher_window(&self) -> usize {
        self.matcher_window.unwrap_or(DEFAULT_MATCHER_WINDOW)
    }
}
