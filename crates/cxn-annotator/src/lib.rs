//! # cxn-annotator
//!
//! 8-phase construction annotation pipeline: features → regex weights → policy scores →
//! curve fit → growth sections → mixture clustering → label resolution → spans.
//! Sentences are independent; batches run in parallel with per-sentence failure isolation.

pub mod algorithms;
pub mod batch;
pub mod engine;
pub mod matcher;
pub mod pipeline;
pub mod segmentation;

pub use batch::{BatchResult, SentenceFailure};
pub use engine::Annotator;
pub use matcher::RegexMatcher;
pub use segmentation::{DictionarySegmenter, Lexicon};
