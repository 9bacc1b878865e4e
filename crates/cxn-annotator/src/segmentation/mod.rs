//! Reference segmenter: forward maximum matching over a user dictionary.

pub mod dictionary;

pub use dictionary::{DictionarySegmenter, Lexicon};
