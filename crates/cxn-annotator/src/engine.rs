//! Annotator: a compiled construction plus its collaborators, shared across
//! sentences and batches.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use cxn_core::config::{AnnotatorConfig, PipelineSettings};
use cxn_core::errors::AnnotationResult;
use cxn_core::traits::{Cancellable, CancellationToken, CurveFitter, PointClusterer, Segmenter};
use cxn_core::types::{AnnotatedSentence, CompiledConstruction, Sentence};

use crate::algorithms::{GaussianMixture, PolynomialFitter};
use crate::batch::{BatchResult, SentenceFailure};
use crate::pipeline::{self, PipelineContext};
use crate::segmentation::{DictionarySegmenter, Lexicon};

/// The main annotation engine.
///
/// Everything it holds is read-only after construction, so one annotator can
/// serve any number of threads.
pub struct Annotator {
    construction: Arc<CompiledConstruction>,
    settings: PipelineSettings,
    segmenter: Arc<dyn Segmenter>,
    fitter: Arc<dyn CurveFitter>,
    clusterer: Arc<dyn PointClusterer>,
}

impl Annotator {
    /// Compile `form` and set up the default collaborators from `config`.
    ///
    /// Invalid configuration, an uncompilable form, or an unreadable user
    /// dictionary fail here rather than per sentence.
    pub fn new(form: &str, config: &AnnotatorConfig) -> AnnotationResult<Self> {
        let settings = config.resolve()?;
        let construction = CompiledConstruction::compile(form, settings.window)?;

        let unknown_tag = config.segmenter.effective_unknown_tag();
        let lexicon = match &config.segmenter.userdict {
            Some(path) => Lexicon::from_file(path, unknown_tag)?,
            None => Lexicon::new(),
        };

        let entries = lexicon.len();
        let segmenter = DictionarySegmenter::new(lexicon, unknown_tag);

        info!(
            form,
            pattern = construction.pattern(),
            variant = ?settings.variant,
            segmenter = segmenter.name(),
            entries,
            "annotator ready"
        );

        Ok(Self {
            construction: Arc::new(construction),
            segmenter: Arc::new(segmenter),
            fitter: Arc::new(PolynomialFitter::new()),
            clusterer: Arc::new(GaussianMixture::from_settings(&settings.cluster)),
            settings,
        })
    }

    /// Replace the segmenter.
    pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Arc::new(segmenter);
        self
    }

    /// Replace the curve fitter.
    pub fn with_fitter(mut self, fitter: impl CurveFitter + 'static) -> Self {
        self.fitter = Arc::new(fitter);
        self
    }

    /// Replace the point clusterer.
    pub fn with_clusterer(mut self, clusterer: impl PointClusterer + 'static) -> Self {
        self.clusterer = Arc::new(clusterer);
        self
    }

    pub fn construction(&self) -> &CompiledConstruction {
        &self.construction
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Name of the segmenter in use.
    pub fn segmenter_name(&self) -> &str {
        self.segmenter.name()
    }

    fn context(&self) -> PipelineContext<'_> {
        PipelineContext {
            construction: &self.construction,
            settings: &self.settings,
            segmenter: self.segmenter.as_ref(),
            fitter: self.fitter.as_ref(),
            clusterer: self.clusterer.as_ref(),
        }
    }

    /// Annotate one sentence.
    pub fn annotate(&self, sentence: &Sentence) -> AnnotationResult<AnnotatedSentence> {
        pipeline::run_pipeline(sentence, &self.context())
    }

    /// Annotate a batch in parallel.
    pub fn annotate_batch(&self, sentences: &[Sentence]) -> BatchResult {
        self.annotate_batch_with_cancel(sentences, &CancellationToken::new())
    }

    /// Annotate a batch in parallel, checking `cancel` before each sentence.
    ///
    /// Output keeps corpus order. A failing sentence is recorded and the
    /// others proceed; sentences not yet started when `cancel` fires are
    /// counted as cancelled.
    pub fn annotate_batch_with_cancel(
        &self,
        sentences: &[Sentence],
        cancel: &CancellationToken,
    ) -> BatchResult {
        info!(
            sentences = sentences.len(),
            form = self.construction.form(),
            segmenter = self.segmenter_name(),
            "batch started"
        );

        let outcomes: Vec<Option<AnnotationResult<AnnotatedSentence>>> = sentences
            .par_iter()
            .map(|sentence| {
                if cancel.is_cancelled() {
                    None
                } else {
                    Some(self.annotate(sentence))
                }
            })
            .collect();

        let mut result = BatchResult::new();
        for (index, (sentence, outcome)) in sentences.iter().zip(outcomes).enumerate() {
            match outcome {
                Some(Ok(annotated)) => result.annotated.push(annotated),
                Some(Err(error)) => {
                    warn!(sentence = %sentence.id, error = %error, "sentence failed");
                    result.add_failure(SentenceFailure {
                        index,
                        id: sentence.id.clone(),
                        error,
                    });
                }
                None => result.cancelled += 1,
            }
        }

        info!(
            annotated = result.annotated.len(),
            failed = result.error_count(),
            cancelled = result.cancelled,
            "batch complete"
        );
        result
    }
}
