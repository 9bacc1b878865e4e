//! Criterion benchmarks for cxn-annotator.
//!
//! - Single sentence, full pipeline
//! - Single sentence, regex-only matcher
//! - Fixture corpus batch (parallel)
//! - Polynomial fit and mixture clustering in isolation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde::Deserialize;

use cxn_annotator::algorithms::{GaussianMixture, PolynomialFitter};
use cxn_annotator::{Annotator, DictionarySegmenter, Lexicon, RegexMatcher};
use cxn_core::config::AnnotatorConfig;
use cxn_core::traits::PointClusterer;
use cxn_core::types::Sentence;

#[derive(Deserialize)]
struct Corpus {
    form: String,
    sentences: Vec<Sentence>,
}

fn annotator(form: &str) -> Annotator {
    let lexicon = Lexicon::parse_userdict(&test_fixtures::load_text("userdict.txt"), "x");
    Annotator::new(form, &AnnotatorConfig::default())
        .expect("default config is valid")
        .with_segmenter(DictionarySegmenter::new(lexicon, "x"))
}

fn bench_single_sentence(c: &mut Criterion) {
    let annotator = annotator("X+得+Y+死");
    let sentence = Sentence::new("b", "她急得快死了，我却一点也不急。");
    c.bench_function("annotate_single_sentence", |b| {
        b.iter(|| annotator.annotate(black_box(&sentence)))
    });

    let matcher = RegexMatcher::new("X+得+Y+死", 10).expect("form compiles");
    c.bench_function("regex_matcher_single_sentence", |b| {
        b.iter(|| matcher.annotate(black_box(&sentence)))
    });
}

fn bench_corpus_batch(c: &mut Criterion) {
    let corpus: Corpus = test_fixtures::load_fixture("corpus.json");
    let sentences: Vec<Sentence> = (0..64)
        .flat_map(|round| {
            corpus
                .sentences
                .iter()
                .map(move |s| Sentence::new(format!("{}-{round}", s.id), s.text.clone()))
        })
        .collect();
    let annotator = annotator(&corpus.form);
    c.bench_function("annotate_batch_512", |b| {
        b.iter(|| annotator.annotate_batch(black_box(&sentences)))
    });
}

fn bench_models(c: &mut Criterion) {
    let x: Vec<f64> = (0..40).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| (v * 0.3).sin() * v).collect();
    c.bench_function("polynomial_fit_degree_8", |b| {
        b.iter(|| PolynomialFitter.fit_curve(black_box(&x), black_box(&y), 8))
    });

    let points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    let gmm = GaussianMixture::new(42, 100, 1e-6);
    c.bench_function("gaussian_mixture_40_points", |b| {
        b.iter(|| gmm.fit_predict(black_box(&points), 3))
    });
}

criterion_group!(
    benches,
    bench_single_sentence,
    bench_corpus_batch,
    bench_models
);
criterion_main!(benches);
