//! Per-character feature records.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::Role;
use crate::constants::{BASE_DERIV_WEIGHT, BASE_REGEX_WEIGHT};

/// Scoring state of one character position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// The character at this position.
    pub value: char,
    /// Regex weight, 1 plus 0.5 per covering match.
    pub regex: f64,
    /// Cumulative policy score as of and including this position.
    pub policy: f64,
    /// Role of the word this character belongs to. `None` until scored.
    pub tag: Option<Role>,
    /// Growth-section weight.
    pub deriv: f64,
    /// Repeated-slot agreement flag.
    pub agree: bool,
}

impl Feature {
    pub fn new(value: char) -> Self {
        Self {
            value,
            regex: BASE_REGEX_WEIGHT,
            policy: 0.0,
            tag: None,
            deriv: BASE_DERIV_WEIGHT,
            agree: false,
        }
    }

    /// The tag, with unscored characters counted as `others`.
    pub fn role(&self) -> Role {
        self.tag.unwrap_or(Role::Others)
    }

    /// True when a match boosted (or the penalty lowered) the regex weight.
    pub fn regex_adjusted(&self) -> bool {
        self.regex != BASE_REGEX_WEIGHT
    }

    /// True when a growth section re-weighted this position.
    pub fn deriv_adjusted(&self) -> bool {
        self.deriv != BASE_DERIV_WEIGHT
    }

    /// `policy * regex * deriv`.
    pub fn composite(&self) -> f64 {
        self.policy * self.regex * self.deriv
    }

    /// `policy * regex`.
    pub fn composite_without_deriv(&self) -> f64 {
        self.policy * self.regex
    }
}

/// Arena of features indexed by character position.
///
/// Positions are contiguous `0..len()` for the lifetime of a sentence.
/// Pipeline stages read one set and return the next; nothing is removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    /// One default feature per character of `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            features: text.chars().map(Feature::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Feature> {
        self.features.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Feature> {
        self.features.get_mut(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Feature> {
        self.features.iter_mut()
    }

    pub fn as_slice(&self) -> &[Feature] {
        &self.features
    }

    /// The characters of `positions`, concatenated in order.
    pub fn text_of(&self, positions: std::ops::Range<usize>) -> String {
        self.features[positions].iter().map(|f| f.value).collect()
    }

    /// The full sentence text.
    pub fn text(&self) -> String {
        self.text_of(0..self.len())
    }
}

impl Index<usize> for FeatureSet {
    type Output = Feature;

    fn index(&self, position: usize) -> &Feature {
        &self.features[position]
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unscored_state() {
        let f = Feature::new('的');
        assert_eq!(f.regex, 1.0);
        assert_eq!(f.policy, 0.0);
        assert_eq!(f.deriv, 1.0);
        assert!(f.tag.is_none());
        assert!(!f.agree);
        assert_eq!(f.role(), Role::Others);
    }

    #[test]
    fn from_text_counts_chars_not_bytes() {
        let set = FeatureSet::from_text("红的花");
        assert_eq!(set.len(), 3);
        assert_eq!(set[1].value, '的');
        assert_eq!(set.text(), "红的花");
    }
}
