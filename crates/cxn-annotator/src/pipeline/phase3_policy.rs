//! Phase 3: Policy scoring.
//!
//! Each segmenter word gets a step (constant/variable/others), projected onto
//! every char it covers. The running sum of step weights is stored per char.
//!
//! Step precedence:
//! - When the form uses a generic slot name (`X`, `Y`, `Z`) and some clause
//!   holds every constant literal, membership in such a segment decides:
//!   inside a segment a construction key is constant and anything else is
//!   variable; outside, others.
//! - Otherwise a constant key is constant, a word whose tag is a slot name is
//!   variable when a constant literal follows within reach, and, with
//!   `regex_fallback`, a word already boosted by the regex is variable.

use std::ops::Range;

use rustc_hash::FxHashMap;
use tracing::trace;

use cxn_core::config::PipelineSettings;
use cxn_core::constants::{BASE_REGEX_WEIGHT, PENALIZED_REGEX_WEIGHT, SINGLE_MATCH_REGEX_WEIGHT};
use cxn_core::errors::SegmentError;
use cxn_core::types::{CompiledConstruction, FeatureSet, Role, Token};

use crate::algorithms::clauses::split_clauses;

/// A segmenter word with the char range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedWord<'a> {
    pub range: Range<usize>,
    pub token: &'a Token,
}

/// Output of the policy phase.
#[derive(Debug, Clone)]
pub struct PolicyScoring {
    pub features: FeatureSet,
    /// Clause segments that contain every constant literal. Empty outside
    /// generic-slot forms.
    pub segments: Vec<Range<usize>>,
}

/// Project segmenter words onto char positions.
///
/// The words must spell the sentence exactly; the first differing position is
/// reported otherwise. Empty words are dropped.
pub fn align_tokens<'a>(
    features: &FeatureSet,
    tokens: &'a [Token],
) -> Result<Vec<AlignedWord<'a>>, SegmentError> {
    let mut aligned = Vec::with_capacity(tokens.len());
    let mut position = 0;

    for token in tokens {
        let start = position;
        for c in token.word.chars() {
            match features.get(position) {
                Some(f) if f.value == c => position += 1,
                _ => return Err(SegmentError::Misaligned { position }),
            }
        }
        if position > start {
            aligned.push(AlignedWord {
                range: start..position,
                token,
            });
        }
    }

    if position != features.len() {
        return Err(SegmentError::Misaligned { position });
    }
    Ok(aligned)
}

/// Clauses of the sentence that contain every constant literal.
pub fn find_segments(
    features: &FeatureSet,
    construction: &CompiledConstruction,
) -> Vec<Range<usize>> {
    if !construction.is_complex() {
        return Vec::new();
    }
    let chars: Vec<char> = features.iter().map(|f| f.value).collect();
    split_clauses(&chars, 0)
        .into_iter()
        .filter(|clause| construction.contains_all_constants(&clause.text))
        .map(|clause| clause.range)
        .collect()
}

/// Score every word, accumulate the running policy, apply the negative-score
/// regex penalty, and flag repeated-slot agreement candidates.
pub fn score_policy(
    features: &FeatureSet,
    tokens: &[Token],
    construction: &CompiledConstruction,
    settings: &PipelineSettings,
) -> Result<PolicyScoring, SegmentError> {
    let words = align_tokens(features, tokens)?;
    let segments = find_segments(features, construction);
    let flag_agreement =
        settings.variant.runs_agreement() && !construction.repeated_slots().is_empty();

    let mut scored = features.clone();
    let mut running = 0.0;

    for word in &words {
        let step = if segments.is_empty() {
            plain_step(features, word, construction, settings.regex_fallback)
        } else {
            segment_step(word, &segments, construction)
        };
        trace!(word = %word.token.word, tag = %word.token.tag, step = %step, "policy step");

        let tag_is_repeated_slot = construction
            .repeated_slots()
            .iter()
            .any(|slot| *slot == word.token.tag);

        for position in word.range.clone() {
            running += settings.weights.weight(step);
            let Some(f) = scored.get_mut(position) else {
                continue;
            };
            f.tag = Some(step);
            f.policy = running;
            if running < 0.0 && f.regex == SINGLE_MATCH_REGEX_WEIGHT {
                f.regex = PENALIZED_REGEX_WEIGHT;
            }
            if flag_agreement {
                let value_is_repeated_slot = construction
                    .repeated_slots()
                    .iter()
                    .any(|slot| slot.chars().eq(std::iter::once(f.value)));
                let tag_agrees = step == Role::Variable && tag_is_repeated_slot;
                f.agree = value_is_repeated_slot || tag_agrees;
            }
        }
    }

    Ok(PolicyScoring {
        features: scored,
        segments,
    })
}

fn segment_step(
    word: &AlignedWord<'_>,
    segments: &[Range<usize>],
    construction: &CompiledConstruction,
) -> Role {
    let inside = segments
        .iter()
        .any(|s| s.start <= word.range.start && word.range.end <= s.end);
    match (inside, construction.contains_key(&word.token.word)) {
        (false, _) => Role::Others,
        (true, true) => Role::Constant,
        (true, false) => Role::Variable,
    }
}

fn plain_step(
    features: &FeatureSet,
    word: &AlignedWord<'_>,
    construction: &CompiledConstruction,
    regex_fallback: bool,
) -> Role {
    if construction.is_constant(&word.token.word) {
        return Role::Constant;
    }
    if construction.is_variable(&word.token.tag) {
        let end = (word.range.end + construction.component_count()).min(features.len());
        if construction.contains_any_constant(&features.text_of(word.range.start..end)) {
            return Role::Variable;
        }
    }
    if regex_fallback && features[word.range.start].regex > BASE_REGEX_WEIGHT {
        return Role::Variable;
    }
    Role::Others
}

/// Drop agreement flags whose value occurs only once among flagged chars.
///
/// A dropped char is reset to `others` with base regex weight; its policy
/// score is left as scored.
pub fn prune_agreement(features: &FeatureSet) -> FeatureSet {
    let mut counts: FxHashMap<char, usize> = FxHashMap::default();
    for f in features.iter().filter(|f| f.agree) {
        *counts.entry(f.value).or_default() += 1;
    }

    let mut pruned = features.clone();
    for f in pruned.iter_mut() {
        if f.agree && counts.get(&f.value) == Some(&1) {
            f.agree = false;
            f.tag = Some(Role::Others);
            f.regex = BASE_REGEX_WEIGHT;
        }
    }
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxn_core::config::AnnotatorConfig;
    use cxn_core::config::ScoreVariant;

    use crate::pipeline::phase1_features::build_features;
    use crate::pipeline::phase2_regex::apply_regex_weights;

    fn settings() -> PipelineSettings {
        AnnotatorConfig::default().resolve().unwrap()
    }

    fn tokens(pairs: &[(&str, &str)]) -> Vec<Token> {
        pairs.iter().map(|(w, t)| Token::new(*w, *t)).collect()
    }

    fn score(
        form: &str,
        text: &str,
        words: &[(&str, &str)],
        settings: &PipelineSettings,
    ) -> PolicyScoring {
        let construction = CompiledConstruction::compile(form, 3).unwrap();
        let weighted = apply_regex_weights(&build_features(text), &construction);
        score_policy(&weighted.features, &tokens(words), &construction, settings).unwrap()
    }

    fn roles(set: &FeatureSet) -> Vec<Role> {
        set.iter().map(|f| f.role()).collect()
    }

    #[test]
    fn misaligned_tokens_are_rejected() {
        let features = build_features("红的花");
        let err = align_tokens(&features, &tokens(&[("红", "a"), ("花", "n")])).unwrap_err();
        assert!(matches!(err, SegmentError::Misaligned { position: 1 }));

        let err = align_tokens(&features, &tokens(&[("红的", "a")])).unwrap_err();
        assert!(matches!(err, SegmentError::Misaligned { position: 2 }));
    }

    #[test]
    fn words_project_onto_every_char() {
        let features = build_features("要死了");
        let words = tokens(&[("要死", "d"), ("", "x"), ("了", "ul")]);
        let aligned = align_tokens(&features, &words).unwrap();
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].range, 0..2);
        assert_eq!(aligned[1].range, 2..3);
    }

    #[test]
    fn segment_membership_decides_in_generic_slot_forms() {
        let s = score(
            "X+得+Y+死",
            "他跑得累死了，我们走吧",
            &[
                ("他", "r"),
                ("跑", "v"),
                ("得", "ud"),
                ("累", "a"),
                ("死", "v"),
                ("了", "ul"),
                ("，", "w"),
                ("我们", "r"),
                ("走", "v"),
                ("吧", "y"),
            ],
            &settings(),
        );
        assert_eq!(s.segments, vec![0..6]);
        use Role::*;
        let mut expected = vec![Variable, Variable, Constant, Variable, Constant, Variable];
        expected.extend([Others; 5]);
        assert_eq!(roles(&s.features), expected);
    }

    #[test]
    fn policy_is_a_running_sum_of_step_weights() {
        let settings = settings();
        let s = score(
            "X+得+Y+死",
            "他跑得累死了，我们走吧",
            &[
                ("他跑得累死了", "x"),
                ("，", "w"),
                ("我们", "r"),
                ("走", "v"),
                ("吧", "y"),
            ],
            &settings,
        );
        let mut expected = 0.0;
        for f in s.features.iter() {
            expected += settings.weights.weight(f.role());
            assert!((f.policy - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn plain_rule_uses_tag_and_window() {
        // Lowercase slot names keep the form out of segment mode.
        let s = score(
            "v+得+a",
            "跑得快，走",
            &[
                ("跑", "v"),
                ("得", "ud"),
                ("快", "a"),
                ("，", "w"),
                ("走", "v"),
            ],
            &settings(),
        );
        assert!(s.segments.is_empty());
        use Role::*;
        // 快 has a slot tag but no constant follows; the fallback picks it up
        // from its regex boost. 走 has neither.
        assert_eq!(
            roles(&s.features),
            vec![Variable, Constant, Variable, Others, Others]
        );
    }

    #[test]
    fn without_fallback_unboosted_slot_words_need_the_window() {
        let mut settings = settings();
        settings.regex_fallback = false;
        let s = score(
            "v+得",
            "走，快",
            &[("走", "v"), ("，", "w"), ("快", "a")],
            &settings,
        );
        use Role::*;
        assert_eq!(roles(&s.features), vec![Others, Others, Others]);
    }

    #[test]
    fn negative_score_penalizes_single_boost() {
        // Nothing is a construction word, so the score falls from the start.
        let mut settings = settings();
        settings.regex_fallback = false;
        let s = score("a+的", "红的", &[("红的", "n")], &settings);
        assert!(s.features.iter().all(|f| f.policy < 0.0));
        assert!(s.features.iter().all(|f| f.regex == PENALIZED_REGEX_WEIGHT));
    }

    #[test]
    fn agreement_flags_and_prunes_singletons() {
        let s = score(
            "X+不+X",
            "好不好，行",
            &[
                ("好", "X"),
                ("不", "d"),
                ("好", "X"),
                ("，", "w"),
                ("行", "X"),
            ],
            &settings(),
        );
        let flagged: Vec<bool> = s.features.iter().map(|f| f.agree).collect();
        assert_eq!(flagged, vec![true, false, true, false, false]);

        let pruned = prune_agreement(&s.features);
        assert!(pruned[0].agree);
        assert!(pruned[2].agree);
    }

    #[test]
    fn lone_agreement_value_is_reset() {
        let mut features = build_features("好不行");
        for (i, f) in features.iter_mut().enumerate() {
            f.tag = Some(Role::Variable);
            f.regex = 1.5;
            f.agree = i != 1;
        }
        let pruned = prune_agreement(&features);
        for i in [0, 2] {
            assert!(!pruned[i].agree);
            assert_eq!(pruned[i].tag, Some(Role::Others));
            assert_eq!(pruned[i].regex, 1.0);
        }
        assert_eq!(pruned[1].tag, Some(Role::Variable));
    }

    #[test]
    fn basic_variant_never_flags_agreement() {
        let mut settings = settings();
        settings.variant = ScoreVariant::Basic;
        let s = score(
            "X+不+X",
            "好不好",
            &[("好", "X"), ("不", "d"), ("好", "X")],
            &settings,
        );
        assert!(s.features.iter().all(|f| !f.agree));
    }
}
