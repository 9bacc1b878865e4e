//! Phase 2: Regex weighting.
//!
//! Every non-overlapping match of the compiled pattern is located by the
//! first occurrence of its matched text, and each position of that char span
//! gains +0.5 regex weight. Spans that land on the same positions accumulate.

use std::ops::Range;

use cxn_core::constants::REGEX_MATCH_BOOST;
use cxn_core::types::{CompiledConstruction, FeatureSet};

/// Output of the regex phase.
#[derive(Debug, Clone)]
pub struct RegexWeighting {
    pub features: FeatureSet,
    /// Char span credited for each match, in match order.
    pub spans: Vec<Range<usize>>,
}

impl RegexWeighting {
    pub fn match_count(&self) -> usize {
        self.spans.len()
    }
}

/// Run the construction pattern over the sentence and boost covered positions.
pub fn apply_regex_weights(
    features: &FeatureSet,
    construction: &CompiledConstruction,
) -> RegexWeighting {
    let text = features.text();
    let offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    let char_index = |byte: usize| offsets.partition_point(|&b| b < byte);

    let spans: Vec<Range<usize>> = construction
        .regex()
        .find_iter(&text)
        .map(|m| {
            let matched = m.as_str();
            let first = text.find(matched).unwrap_or(m.start());
            let start = char_index(first);
            start..start + matched.chars().count()
        })
        .collect();

    let mut weighted = features.clone();
    for span in &spans {
        for position in span.clone() {
            if let Some(f) = weighted.get_mut(position) {
                f.regex += REGEX_MATCH_BOOST;
            }
        }
    }

    RegexWeighting {
        features: weighted,
        spans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phase1_features::build_features;

    fn weigh(form: &str, text: &str) -> RegexWeighting {
        let construction = CompiledConstruction::compile(form, 3).unwrap();
        apply_regex_weights(&build_features(text), &construction)
    }

    fn regex_weights(w: &RegexWeighting) -> Vec<f64> {
        w.features.iter().map(|f| f.regex).collect()
    }

    #[test]
    fn boosts_each_match() {
        let w = weigh("X+的", "红的花很红的");
        assert_eq!(w.spans, vec![0..2, 2..6]);
        assert_eq!(regex_weights(&w), vec![1.5; 6]);
    }

    #[test]
    fn positions_outside_matches_keep_base_weight() {
        let w = weigh("X+的", "。红的！");
        assert_eq!(w.spans, vec![1..3]);
        assert_eq!(regex_weights(&w), vec![1.0, 1.5, 1.5, 1.0]);
    }

    #[test]
    fn repeated_match_text_credits_its_first_occurrence() {
        let w = weigh("X+的", "红的，红的");
        assert_eq!(w.spans, vec![0..2, 0..2]);
        assert_eq!(regex_weights(&w), vec![2.0, 2.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn no_match_leaves_weights_untouched() {
        let w = weigh("X+得+Y+死", "今天天气很好");
        assert_eq!(w.match_count(), 0);
        assert!(regex_weights(&w).iter().all(|&r| r == 1.0));
    }
}
