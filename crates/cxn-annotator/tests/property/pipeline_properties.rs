//! Property tests for the annotation pipeline phases.

use proptest::prelude::*;

use cxn_annotator::pipeline::{
    phase1_features, phase2_regex, phase3_policy, phase5_derivative, phase7_resolution,
};
use cxn_annotator::Annotator;
use cxn_core::config::AnnotatorConfig;
use cxn_core::errors::SegmentError;
use cxn_core::traits::Segmenter;
use cxn_core::types::{CompiledConstruction, Role, Sentence, Token};

struct PerChar;

impl Segmenter for PerChar {
    fn segment(&self, text: &str) -> Result<Vec<Token>, SegmentError> {
        Ok(text
            .chars()
            .map(|c| {
                let tag = if c == '好' { "X" } else { "x" };
                Token::new(c.to_string(), tag)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "per-char"
    }
}

const CHARS: [char; 12] = [
    '红', '的', '花', '很', '好', '不', '得', '死', '，', '。', 'a', '1',
];

fn sentence_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(CHARS.to_vec()),
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn form() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["X+的", "X+得+Y+死", "X+不+X", "a+的"])
}

fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn settings() -> cxn_core::PipelineSettings {
    AnnotatorConfig::default().resolve().unwrap()
}

fn weigh(text: &str, construction: &CompiledConstruction) -> phase2_regex::RegexWeighting {
    phase2_regex::apply_regex_weights(&phase1_features::build_features(text), construction)
}

fn annotator(form: &str) -> Annotator {
    Annotator::new(form, &AnnotatorConfig::default())
        .unwrap()
        .with_segmenter(PerChar)
}

proptest! {
    #[test]
    fn prop_one_feature_per_char(text in sentence_text()) {
        let features = phase1_features::build_features(&text);
        prop_assert_eq!(features.len(), text.chars().count());
        prop_assert_eq!(features.text(), text);
    }

    #[test]
    fn prop_regex_weight_counts_covering_spans(text in sentence_text(), form in form()) {
        let construction = CompiledConstruction::compile(form, 3).unwrap();
        let weighted = weigh(&text, &construction);
        for (i, f) in weighted.features.iter().enumerate() {
            let covering = weighted.spans.iter().filter(|s| s.contains(&i)).count();
            prop_assert!((f.regex - (1.0 + 0.5 * covering as f64)).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_policy_is_a_running_sum(text in sentence_text(), form in form()) {
        let settings = settings();
        let construction = CompiledConstruction::compile(form, 3).unwrap();
        let weighted = weigh(&text, &construction);
        let tokens = PerChar.segment(&text).unwrap();
        let scored =
            phase3_policy::score_policy(&weighted.features, &tokens, &construction, &settings)
                .unwrap();

        let mut running = 0.0;
        for f in scored.features.iter() {
            running += settings.weights.weight(f.role());
            prop_assert!((f.policy - running).abs() < 1e-9);
            prop_assert!(f.tag.is_some());
        }
    }

    #[test]
    fn prop_pruned_agreement_values_repeat(text in sentence_text()) {
        let construction = CompiledConstruction::compile("X+不+X", 3).unwrap();
        let weighted = weigh(&text, &construction);
        let tokens = PerChar.segment(&text).unwrap();
        let settings = settings();
        let scored =
            phase3_policy::score_policy(&weighted.features, &tokens, &construction, &settings)
                .unwrap();
        let pruned = phase3_policy::prune_agreement(&scored.features);

        for (before, after) in scored.features.iter().zip(pruned.iter()) {
            let flagged_same_value = scored
                .features
                .iter()
                .filter(|f| f.agree && f.value == before.value)
                .count();
            if before.agree && flagged_same_value == 1 {
                prop_assert!(!after.agree);
                prop_assert_eq!(after.tag, Some(Role::Others));
                prop_assert_eq!(after.regex, 1.0);
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn prop_deriv_only_moves_in_retained_segments(
        text in sentence_text(),
        fitted in prop::collection::vec(-5.0f64..5.0, 24),
        policies in prop::collection::vec(-3.0f64..3.0, 24),
    ) {
        let construction = CompiledConstruction::compile("X+的", 3).unwrap();
        let mut features = phase1_features::build_features(&text);
        for (f, &p) in features.iter_mut().zip(&policies) {
            f.policy = p;
        }
        let fitted = &fitted[..features.len()];
        let retained = phase5_derivative::retained_segments(&features, fitted, &construction);
        let adjusted = phase5_derivative::adjust_derivatives(&features, fitted, &construction);

        for (i, f) in adjusted.iter().enumerate() {
            let expected = if !retained.iter().any(|r| r.contains(&i)) {
                1.0
            } else if f.policy > 0.0 {
                1.2
            } else {
                0.2
            };
            prop_assert_eq!(f.deriv, expected);
        }
    }

    #[test]
    fn prop_smoothing_clears_flanked_positions(labels in prop::collection::vec(role(), 0..30)) {
        let smoothed = phase7_resolution::smooth(&labels);
        prop_assert_eq!(smoothed.len(), labels.len());
        for i in 1..labels.len().saturating_sub(1) {
            if labels[i - 1] == Role::Others && labels[i + 1] == Role::Others {
                prop_assert_eq!(smoothed[i], Role::Others);
            } else {
                prop_assert_eq!(smoothed[i], labels[i]);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_spans_reassemble_the_sentence(text in sentence_text(), form in form()) {
        let annotator = annotator(form);
        let out = annotator.annotate(&Sentence::new("p", text.clone())).unwrap();
        prop_assert_eq!(out.text(), text);
        for span in out.spans.iter().filter(|s| s.is_cxn()) {
            prop_assert!(annotator.construction().contains_all_constants(&span.text()));
        }
    }

    #[test]
    fn prop_rerun_is_identical(text in sentence_text(), form in form()) {
        let annotator = annotator(form);
        let sentence = Sentence::new("p", text);
        let first = annotator.annotate(&sentence).unwrap();
        let second = annotator.annotate(&sentence).unwrap();
        prop_assert_eq!(first, second);
    }
}
