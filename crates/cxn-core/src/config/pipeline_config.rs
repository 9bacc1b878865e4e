//! Pipeline variant configuration.

use serde::{Deserialize, Serialize};

/// Which stages run and which composite score formula is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreVariant {
    /// Agreement and growth-section stages run; composite is `policy * regex * deriv`.
    #[default]
    Full,
    /// No agreement or growth-section stage; composite is `policy * regex`.
    Basic,
}

impl ScoreVariant {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Some(Self::Full),
            "basic" => Some(Self::Basic),
            _ => None,
        }
    }

    /// Whether repeated-slot agreement is flagged and pruned.
    pub fn runs_agreement(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Whether growth sections re-weight `deriv`.
    pub fn runs_growth_sections(self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Configuration for the scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Pipeline variant. Default: full.
    pub variant: Option<ScoreVariant>,
    /// Treat words already boosted by the regex as variables when the
    /// plain policy rule finds nothing. Default: true.
    pub regex_fallback: Option<bool>,
}

impl PipelineConfig {
    pub fn effective_variant(&self) -> ScoreVariant {
        self.variant.unwrap_or_default()
    }

    pub fn effective_regex_fallback(&self) -> bool {
        self.regex_fallback.unwrap_or(true)
    }
}
