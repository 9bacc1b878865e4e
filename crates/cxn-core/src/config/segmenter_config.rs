//! Dictionary segmenter configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_UNKNOWN_TAG;

/// Configuration for the built-in dictionary segmenter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SegmenterConfig {
    /// User dictionary in `word [freq] [tag]` line format.
    pub userdict: Option<PathBuf>,
    /// Tag for characters missing from the dictionary. Default: "x".
    pub unknown_tag: Option<String>,
}

impl SegmenterConfig {
    pub fn effective_unknown_tag(&self) -> &str {
        self.unknown_tag.as_deref().unwrap_or(DEFAULT_UNKNOWN_TAG)
    }
}
