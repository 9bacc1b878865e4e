//! Phase 8: Span assembly.
//!
//! Runs of `others` become context text; runs of constant/variable chars
//! become construction chunks. A chunk whose text misses a constant literal
//! is demoted to context, and neighbouring context spans are merged.

use cxn_core::types::{CompiledConstruction, CxnToken, FeatureSet, Role, Span};

/// Build the output spans from the final per-char labels.
pub fn assemble_spans(
    features: &FeatureSet,
    labels: &[Role],
    construction: &CompiledConstruction,
) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut context = String::new();
    let mut chunk: Vec<CxnToken> = Vec::new();

    for (f, &label) in features.iter().zip(labels) {
        if label.is_construction() {
            if !context.is_empty() {
                push_context(&mut spans, std::mem::take(&mut context));
            }
            chunk.push(CxnToken {
                ch: f.value,
                role: label,
            });
        } else {
            if !chunk.is_empty() {
                push_chunk(&mut spans, std::mem::take(&mut chunk), construction);
            }
            context.push(f.value);
        }
    }
    if !chunk.is_empty() {
        push_chunk(&mut spans, chunk, construction);
    }
    if !context.is_empty() || spans.is_empty() {
        push_context(&mut spans, context);
    }

    spans
}

/// Demote the chunk to context if it lacks a constant literal.
fn push_chunk(spans: &mut Vec<Span>, chunk: Vec<CxnToken>, construction: &CompiledConstruction) {
    let text: String = chunk.iter().map(|t| t.ch).collect();
    if construction.contains_all_constants(&text) {
        spans.push(Span::Cxn(chunk));
    } else {
        push_context(spans, text);
    }
}

fn push_context(spans: &mut Vec<Span>, text: String) {
    match spans.last_mut() {
        Some(Span::Context(previous)) => previous.push_str(&text),
        _ => spans.push(Span::Context(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Role::*;

    fn construction() -> CompiledConstruction {
        CompiledConstruction::compile("X+的", 3).unwrap()
    }

    fn text_of(spans: &[Span]) -> String {
        spans.iter().map(Span::text).collect()
    }

    #[test]
    fn alternates_context_and_chunks() {
        let features = FeatureSet::from_text("红的花很红的");
        let labels = [Variable, Constant, Others, Others, Variable, Constant];
        let spans = assemble_spans(&features, &labels, &construction());
        assert_eq!(spans.len(), 3);
        assert_eq!(
            spans[0],
            Span::Cxn(vec![
                CxnToken {
                    ch: '红',
                    role: Variable,
                },
                CxnToken {
                    ch: '的',
                    role: Constant,
                },
            ])
        );
        assert_eq!(spans[1], Span::Context("花很".into()));
        assert!(spans[2].is_cxn());
        assert_eq!(text_of(&spans), "红的花很红的");
    }

    #[test]
    fn chunk_without_constant_is_demoted_and_merged() {
        let features = FeatureSet::from_text("红的花很好");
        let labels = [Variable, Constant, Others, Variable, Others];
        let spans = assemble_spans(&features, &labels, &construction());
        assert_eq!(spans.len(), 2);
        assert!(spans[0].is_cxn());
        assert_eq!(spans[1], Span::Context("花很好".into()));
    }

    #[test]
    fn all_others_is_one_context_span() {
        let features = FeatureSet::from_text("花很好");
        let spans = assemble_spans(&features, &[Others; 3], &construction());
        assert_eq!(spans, vec![Span::Context("花很好".into())]);
    }

    #[test]
    fn empty_sentence_yields_empty_context() {
        let spans = assemble_spans(&FeatureSet::default(), &[], &construction());
        assert_eq!(spans, vec![Span::Context(String::new())]);
    }
}
