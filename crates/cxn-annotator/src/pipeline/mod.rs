//! 8-phase annotation pipeline orchestrator.
//!
//! Phase 1: Features → Phase 2: Regex weights → Phase 3: Policy scores →
//! Phase 4: Curve fit → Phase 5: Growth sections → Phase 6: Clustering →
//! Phase 7: Label resolution → Phase 8: Spans
//!
//! Every phase reads the previous phase's feature snapshot and returns a new
//! one. A sentence without any pattern match stops after phase 2.

pub mod phase1_features;
pub mod phase2_regex;
pub mod phase3_policy;
pub mod phase4_curve;
pub mod phase5_derivative;
pub mod phase6_clustering;
pub mod phase7_resolution;
pub mod phase8_spans;

use tracing::debug;

use cxn_core::config::{PipelineSettings, ScoreVariant};
use cxn_core::errors::AnnotationResult;
use cxn_core::traits::{CurveFitter, PointClusterer, Segmenter};
use cxn_core::types::{AnnotatedSentence, CompiledConstruction, Feature, Role, Sentence, Span};

/// Composite score of one feature under `variant`.
pub fn composite(feature: &Feature, variant: ScoreVariant) -> f64 {
    match variant {
        ScoreVariant::Full => feature.composite(),
        ScoreVariant::Basic => feature.composite_without_deriv(),
    }
}

/// Read-only collaborators and settings shared by every sentence.
#[derive(Clone, Copy)]
pub struct PipelineContext<'a> {
    pub construction: &'a CompiledConstruction,
    pub settings: &'a PipelineSettings,
    pub segmenter: &'a dyn Segmenter,
    pub fitter: &'a dyn CurveFitter,
    pub clusterer: &'a dyn PointClusterer,
}

/// Run all phases for one sentence.
pub fn run_pipeline(
    sentence: &Sentence,
    ctx: &PipelineContext<'_>,
) -> AnnotationResult<AnnotatedSentence> {
    let variant = ctx.settings.variant;

    // Phase 1: Features.
    let features = phase1_features::build_features(&sentence.text);

    // Phase 2: Regex weights.
    let weighted = phase2_regex::apply_regex_weights(&features, ctx.construction);
    debug!(sentence = %sentence.id, matches = weighted.match_count(), "Phase 2: regex weights");
    if weighted.match_count() == 0 {
        return Ok(AnnotatedSentence {
            id: sentence.id.clone(),
            spans: vec![Span::Context(sentence.text.clone())],
        });
    }

    // Phase 3: Policy scores, then agreement pruning.
    let tokens = ctx.segmenter.segment(&sentence.text)?;
    let scoring =
        phase3_policy::score_policy(&weighted.features, &tokens, ctx.construction, ctx.settings)?;
    let scored = if variant.runs_agreement() {
        phase3_policy::prune_agreement(&scoring.features)
    } else {
        scoring.features
    };
    debug!(
        sentence = %sentence.id,
        words = tokens.len(),
        segments = scoring.segments.len(),
        "Phase 3: policy scores"
    );

    // Phase 4: Curve fit.
    let degree = ctx
        .settings
        .degree
        .degree_for(scored.len(), ctx.construction.component_count());
    let curve = phase4_curve::fit_curve(&scored, variant, degree, ctx.fitter)?;
    debug!(sentence = %sentence.id, degree, skipped = curve.skipped, "Phase 4: curve fit");

    // Phase 5: Growth sections.
    let adjusted = if variant.runs_growth_sections() {
        phase5_derivative::adjust_derivatives(&scored, &curve.fitted, ctx.construction)
    } else {
        scored
    };

    // Phase 6: Clustering.
    let assignment = phase6_clustering::cluster_positions(&adjusted, variant, ctx.clusterer)?;

    // Phase 7: Label resolution.
    let tags: Vec<Role> = adjusted.iter().map(Feature::role).collect();
    let classes = phase7_resolution::resolve_classes(&assignment.labels, &tags, assignment.k);
    debug!(sentence = %sentence.id, classes = ?classes, "Phase 6-7: cluster classes");
    let labels = phase7_resolution::label_characters(&adjusted, &assignment.labels, &classes);
    let labels = phase7_resolution::smooth(&labels);

    // Phase 8: Spans.
    let spans = phase8_spans::assemble_spans(&adjusted, &labels, ctx.construction);
    debug!(sentence = %sentence.id, spans = spans.len(), "Phase 8: spans assembled");

    Ok(AnnotatedSentence {
        id: sentence.id.clone(),
        spans,
    })
}
