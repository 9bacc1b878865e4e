//! Batch outcome: annotated sentences plus per-sentence failures.

use cxn_core::errors::AnnotationError;
use cxn_core::types::AnnotatedSentence;

/// A sentence that failed; the rest of the batch is unaffected.
#[derive(Debug)]
pub struct SentenceFailure {
    /// Position of the sentence in the input batch.
    pub index: usize,
    pub id: String,
    pub error: AnnotationError,
}

/// Result of a batch run that accumulates per-sentence errors.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Successfully annotated sentences, in corpus order.
    pub annotated: Vec<AnnotatedSentence>,
    /// Failed sentences, in corpus order.
    pub failures: Vec<SentenceFailure>,
    /// Sentences not started because the batch was cancelled.
    pub cancelled: usize,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_failure(&mut self, failure: SentenceFailure) {
        self.failures.push(failure);
    }

    /// True when every sentence was annotated.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.cancelled == 0
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    /// Sentences accounted for: annotated, failed, or skipped.
    pub fn total(&self) -> usize {
        self.annotated.len() + self.failures.len() + self.cancelled
    }
}
