//! Word segmentation and part-of-speech tagging contract.

use crate::errors::SegmentError;
use crate::types::Token;

/// Splits a sentence into tagged words.
///
/// The words must concatenate back to the input exactly; the pipeline
/// projects each word onto the character positions it covers.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<Token>, SegmentError>;

    /// Name for logs and diagnostics.
    fn name(&self) -> &str;
}
