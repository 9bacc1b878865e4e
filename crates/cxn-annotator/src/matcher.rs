//! Regex-only annotation.
//!
//! Each match of the form, compiled with any-character slot placeholders,
//! becomes one construction span; everything between matches is context.
//! Inside a match, chars that occur in a constant literal are constant and
//! the rest are variable. No scoring or models are involved.

use tracing::debug;

use cxn_core::config::PipelineSettings;
use cxn_core::errors::ConstructionError;
use cxn_core::types::construction::Placeholder;
use cxn_core::types::{AnnotatedSentence, CompiledConstruction, CxnToken, Role, Sentence, Span};

/// Annotates by pattern match alone.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    construction: CompiledConstruction,
}

impl RegexMatcher {
    pub fn new(form: &str, window: usize) -> Result<Self, ConstructionError> {
        Ok(Self {
            construction: CompiledConstruction::compile_with(form, window, Placeholder::AnyChar)?,
        })
    }

    /// Use the matcher window of resolved settings.
    pub fn from_settings(
        form: &str,
        settings: &PipelineSettings,
    ) -> Result<Self, ConstructionError> {
        Self::new(form, settings.matcher_window)
    }

    pub fn construction(&self) -> &CompiledConstruction {
        &self.construction
    }

    pub fn annotate(&self, sentence: &Sentence) -> AnnotatedSentence {
        let text = sentence.text.as_str();
        let mut spans = Vec::new();
        let mut last = 0;

        for m in self.construction.regex().find_iter(text) {
            if m.start() > last {
                spans.push(Span::Context(text[last..m.start()].to_string()));
            }
            let tokens = m
                .as_str()
                .chars()
                .map(|ch| CxnToken {
                    ch,
                    role: if self.construction.is_constant_char(ch) {
                        Role::Constant
                    } else {
                        Role::Variable
                    },
                })
                .collect();
            spans.push(Span::Cxn(tokens));
            last = m.end();
        }
        if last < text.len() || spans.is_empty() {
            spans.push(Span::Context(text[last..].to_string()));
        }

        debug!(sentence = %sentence.id, spans = spans.len(), "regex matcher");
        AnnotatedSentence {
            id: sentence.id.clone(),
            spans,
        }
    }

    pub fn annotate_all(&self, sentences: &[Sentence]) -> Vec<AnnotatedSentence> {
        sentences.iter().map(|s| self.annotate(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(span: &Span) -> Vec<Role> {
        span.tokens().iter().map(|t| t.role).collect()
    }

    #[test]
    fn marks_matches_and_gaps() {
        let matcher = RegexMatcher::new("X+得+Y+死", 10).unwrap();
        let out = matcher.annotate(&Sentence::new("s", "他跑得累死了。"));
        assert_eq!(out.spans.len(), 2);
        assert_eq!(out.spans[0].text(), "他跑得累死");
        use Role::*;
        let expected = vec![Variable, Variable, Constant, Variable, Constant];
        assert_eq!(roles(&out.spans[0]), expected);
        assert_eq!(out.spans[1], Span::Context("了。".to_string()));
        assert_eq!(out.text(), "他跑得累死了。");
    }

    #[test]
    fn any_char_placeholder_crosses_punctuation() {
        let matcher = RegexMatcher::new("X+的", 10).unwrap();
        let out = matcher.annotate(&Sentence::new("s", "，红的"));
        assert_eq!(out.cxn_count(), 1);
        assert_eq!(out.spans[0].text(), "，红的");
    }

    #[test]
    fn no_match_is_one_context_span() {
        let matcher = RegexMatcher::new("X+的", 10).unwrap();
        let out = matcher.annotate(&Sentence::new("s", "花很好"));
        assert_eq!(out.spans, vec![Span::Context("花很好".to_string())]);

        let out = matcher.annotate(&Sentence::new("e", ""));
        assert_eq!(out.spans, vec![Span::Context(String::new())]);
    }

    #[test]
    fn window_bounds_the_slot() {
        let matcher = RegexMatcher::new("X+的", 2).unwrap();
        let out = matcher.annotate(&Sentence::new("s", "很很很红的"));
        // Leftmost match wins: the slot takes two chars before 的.
        assert_eq!(out.spans[0], Span::Context("很很".to_string()));
        assert_eq!(out.spans[1].text(), "很红的");
    }
}
