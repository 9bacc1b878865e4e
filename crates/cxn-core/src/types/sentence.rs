//! Sentences, segmenter tokens, and annotation output.

use serde::{Deserialize, Serialize};

use super::Span;

/// A raw corpus sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: String,
    pub text: String,
}

impl Sentence {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Number of character positions.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One segmenter output unit: a word and its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub tag: String,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// The spans produced for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub id: String,
    pub spans: Vec<Span>,
}

impl AnnotatedSentence {
    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }

    /// Number of construction spans.
    pub fn cxn_count(&self) -> usize {
        self.spans.iter().filter(|s| s.is_cxn()).count()
    }
}
