//! Lexicon loading and forward maximum matching.
//!
//! The user dictionary uses the jieba line format `word [freq] [tag]`.
//! Frequency columns are accepted and ignored; blank lines and `#` comments
//! are skipped.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use cxn_core::constants::{LATIN_TAG, NUMERAL_TAG, PUNCTUATION_TAG};
use cxn_core::errors::SegmentError;
use cxn_core::traits::Segmenter;
use cxn_core::types::Token;

use crate::algorithms::clauses::is_word_char;

/// Word → tag table with the longest entry length in chars.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: FxHashMap<String, String>,
    max_len: usize,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text. Entries without a tag get `default_tag`.
    pub fn parse_userdict(content: &str, default_tag: &str) -> Self {
        let mut lexicon = Self::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let tag = fields
                .find(|f| f.parse::<f64>().is_err())
                .unwrap_or(default_tag);
            lexicon.insert(word, tag);
        }
        lexicon
    }

    /// Load a dictionary file.
    pub fn from_file(path: &Path, default_tag: &str) -> Result<Self, SegmentError> {
        let content = std::fs::read_to_string(path).map_err(|e| SegmentError::Dictionary {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let lexicon = Self::parse_userdict(&content, default_tag);
        debug!(path = %path.display(), entries = lexicon.len(), "loaded user dictionary");
        Ok(lexicon)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, word: &str, tag: &str) {
        self.max_len = self.max_len.max(word.chars().count());
        self.entries.insert(word.to_string(), tag.to_string());
    }

    pub fn tag_of(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    /// Longest entry, in chars.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Punctuation,
    Numeral,
    Latin,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_numeric() {
            Self::Numeral
        } else if c.is_ascii_alphabetic() {
            Self::Latin
        } else if !is_word_char(c) {
            Self::Punctuation
        } else {
            Self::Other
        }
    }

    /// Numeral and Latin runs are kept together as one word.
    fn groups(self) -> bool {
        matches!(self, Self::Numeral | Self::Latin)
    }
}

/// Greedy longest-match segmenter.
///
/// At each position the longest lexicon entry wins. Characters no entry
/// covers become words of their own, except that digit runs and ASCII letter
/// runs stay together.
#[derive(Debug, Clone)]
pub struct DictionarySegmenter {
    lexicon: Lexicon,
    unknown_tag: String,
}

impl DictionarySegmenter {
    pub fn new(lexicon: Lexicon, unknown_tag: impl Into<String>) -> Self {
        Self {
            lexicon,
            unknown_tag: unknown_tag.into(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn longest_entry(&self, chars: &[char], start: usize) -> Option<(usize, &str)> {
        let limit = self.lexicon.max_len().min(chars.len() - start);
        (1..=limit).rev().find_map(|len| {
            let word: String = chars[start..start + len].iter().collect();
            self.lexicon.tag_of(&word).map(|tag| (len, tag))
        })
    }

    fn unknown_tag_for(&self, class: CharClass) -> &str {
        match class {
            CharClass::Punctuation => PUNCTUATION_TAG,
            CharClass::Numeral => NUMERAL_TAG,
            CharClass::Latin => LATIN_TAG,
            CharClass::Other => &self.unknown_tag,
        }
    }
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Token>, SegmentError> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if let Some((len, tag)) = self.longest_entry(&chars, i) {
                let word: String = chars[i..i + len].iter().collect();
                tokens.push(Token::new(word, tag));
                i += len;
                continue;
            }

            let class = CharClass::of(chars[i]);
            let mut end = i + 1;
            if class.groups() {
                while end < chars.len()
                    && CharClass::of(chars[end]) == class
                    && self.longest_entry(&chars, end).is_none()
                {
                    end += 1;
                }
            }
            tokens.push(Token::new(
                chars[i..end].iter().collect::<String>(),
                self.unknown_tag_for(class),
            ));
            i = end;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}
