//! Workspace umbrella crate for werval, a word-error-rate evaluation
//! toolkit.
//!
//! This crate stitches transcript normalization, token alignment, and
//! metrics reporting into a single pipeline so callers can score
//! `(reference, prediction)` pairs, one at a time or as whole datasets,
//! with one API entry point.
//!
//! ```
//! use werval::{evaluate_sample, EvalConfig, PreprocessOptions};
//!
//! let cfg = EvalConfig {
//!     preprocess: PreprocessOptions::all(),
//!     ..Default::default()
//! };
//! let report = evaluate_sample("Hello, world!", "hello world", &cfg)
//!     .expect("inputs within limits");
//! assert_eq!(report.wer, 0.0);
//! ```

pub mod config;

pub use werval_align::{
    align, Alignment, AlignmentEntry, AlignConfig, AlignError, ErrorDetail, Side,
};
pub use werval_dataset::{
    load_samples, load_samples_as, parse_delimited, parse_json, DatasetError, DatasetFormat,
    Sample,
};
pub use werval_normalize::{collapse_whitespace, normalize, tokenize, PreprocessOptions};
pub use werval_report::{
    compute_metrics, render_alignment, BatchTotals, ErrorBreakdown, ErrorGroup, MetricsReport,
};

use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while evaluating samples through the pipeline.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Token alignment failed (invalid config or oversized input).
    #[error("alignment failure: {0}")]
    Align(#[from] AlignError),
    /// The dataset could not be loaded or parsed.
    #[error("dataset failure: {0}")]
    Dataset(#[from] DatasetError),
}

/// Configuration for the whole evaluation pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EvalConfig {
    /// Normalization applied identically to both sides before tokenizing.
    /// The default leaves text untouched (verbatim tokenization).
    pub preprocess: PreprocessOptions,
    /// Alignment limits.
    pub align: AlignConfig,
    /// Evaluate batch samples on the rayon thread pool. Per-sample results
    /// and batch totals are identical either way; this is purely a
    /// throughput knob.
    pub use_parallel: bool,
}

/// Metrics observer for pipeline stages.
pub trait EvalMetrics: Send + Sync {
    /// Called once per scored sample with the wall-clock latency of the
    /// normalize → align → report sequence.
    fn record_sample(&self, latency: Duration, report: &MetricsReport);
    /// Called once per batch after aggregation.
    fn record_batch(&self, latency: Duration, totals: &BatchTotals);
}

/// Install or clear the global evaluation metrics recorder.
///
/// Typically called once during startup so all evaluation calls share the
/// same metrics backend.
pub fn set_eval_metrics(recorder: Option<Arc<dyn EvalMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("eval metrics lock poisoned");
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn EvalMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn EvalMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn EvalMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Scores one `(reference, prediction)` pair end-to-end: normalize both
/// sides with the same options, tokenize, align, and aggregate metrics.
pub fn evaluate_sample(
    reference: &str,
    prediction: &str,
    cfg: &EvalConfig,
) -> Result<MetricsReport, EvalError> {
    let start = Instant::now();

    let reference_tokens = tokenize(&normalize(reference, &cfg.preprocess));
    let prediction_tokens = tokenize(&normalize(prediction, &cfg.preprocess));
    let alignment = align(&reference_tokens, &prediction_tokens, &cfg.align)?;
    let report = compute_metrics(alignment.entries);

    if let Some(recorder) = metrics_recorder() {
        recorder.record_sample(start.elapsed(), &report);
    }
    Ok(report)
}

/// Per-dataset result: aggregate totals plus the per-sample reports in
/// input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    pub totals: BatchTotals,
    pub reports: Vec<MetricsReport>,
}

/// Scores every sample and aggregates the totals.
///
/// Samples are independent, so with `use_parallel` they are scored on the
/// rayon pool; aggregation is an associative [`BatchTotals`] reduction
/// either way, which makes the result independent of execution order and
/// parallelism granularity.
pub fn evaluate_batch(samples: &[Sample], cfg: &EvalConfig) -> Result<BatchReport, EvalError> {
    let start = Instant::now();

    let reports: Vec<MetricsReport> = if cfg.use_parallel {
        samples
            .par_iter()
            .map(|sample| evaluate_sample(&sample.reference, &sample.prediction, cfg))
            .collect::<Result<_, _>>()?
    } else {
        samples
            .iter()
            .map(|sample| evaluate_sample(&sample.reference, &sample.prediction, cfg))
            .collect::<Result<_, _>>()?
    };

    let totals: BatchTotals = reports.iter().sum();
    info!(
        samples = totals.samples,
        total_words = totals.total_words,
        errors = totals.error_total(),
        wer = totals.wer(),
        "batch_evaluated"
    );

    if let Some(recorder) = metrics_recorder() {
        recorder.record_batch(start.elapsed(), &totals);
    }
    Ok(BatchReport { totals, reports })
}

/// Loads a dataset file (format inferred from the extension) and evaluates
/// every sample in it.
pub fn evaluate_dataset(path: &Path, cfg: &EvalConfig) -> Result<BatchReport, EvalError> {
    let samples = load_samples(path)?;
    evaluate_batch(&samples, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};

    fn sample(reference: &str, prediction: &str) -> Sample {
        Sample {
            reference: reference.into(),
            prediction: prediction.into(),
        }
    }

    #[test]
    fn normalization_feeds_alignment() {
        let cfg = EvalConfig {
            preprocess: PreprocessOptions {
                lowercase: true,
                remove_punctuation: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let report = evaluate_sample("Hello, world!", "hello world", &cfg)
            .expect("evaluation should succeed");
        assert_eq!(report.wer, 0.0);
        assert_eq!(report.total_words, 2);
    }

    #[test]
    fn verbatim_default_sees_case_differences() {
        let report = evaluate_sample("Hello world", "hello world", &EvalConfig::default())
            .expect("evaluation should succeed");
        assert_eq!(report.substitutions, 1);
        assert_eq!(report.wer, 0.5);
    }

    #[test]
    fn oversized_input_surfaces_align_error() {
        let cfg = EvalConfig {
            align: AlignConfig {
                max_tokens: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = evaluate_sample("a b c", "a b", &cfg);
        assert!(matches!(
            result,
            Err(EvalError::Align(AlignError::SequenceTooLong { .. }))
        ));
    }

    #[test]
    fn batch_totals_sum_counts_not_rates() {
        let samples = vec![
            sample("one two three four", "one two three more"),
            sample("a b c d e f", "a b c d x"),
        ];
        let batch =
            evaluate_batch(&samples, &EvalConfig::default()).expect("batch should succeed");
        assert_eq!(batch.totals.samples, 2);
        assert_eq!(batch.totals.total_words, 10);
        assert_eq!(batch.totals.error_total(), 3);
        assert_eq!(batch.totals.wer(), 0.3);
    }

    #[test]
    fn parallel_batch_matches_sequential() {
        let samples: Vec<Sample> = (0..64)
            .map(|i| {
                sample(
                    "the quick brown fox jumps over the lazy dog",
                    if i % 3 == 0 {
                        "the quick brown fox jumps over a lazy dog"
                    } else {
                        "quick brown fox jumped over the dog"
                    },
                )
            })
            .collect();

        let sequential =
            evaluate_batch(&samples, &EvalConfig::default()).expect("sequential batch");
        let parallel = evaluate_batch(
            &samples,
            &EvalConfig {
                use_parallel: true,
                ..Default::default()
            },
        )
        .expect("parallel batch");

        assert_eq!(sequential.totals, parallel.totals);
        assert_eq!(sequential.reports, parallel.reports);
    }

    struct RecordingMetrics {
        events: Arc<RwLock<Vec<(&'static str, usize)>>>,
    }

    impl RecordingMetrics {
        fn new() -> Self {
            Self {
                events: Arc::new(RwLock::new(Vec::new())),
            }
        }

        fn snapshot(&self) -> Vec<(&'static str, usize)> {
            self.events.read().unwrap().clone()
        }
    }

    impl EvalMetrics for RecordingMetrics {
        fn record_sample(&self, _latency: Duration, report: &MetricsReport) {
            self.events
                .write()
                .unwrap()
                .push(("sample", report.total_words));
        }

        fn record_batch(&self, _latency: Duration, totals: &BatchTotals) {
            self.events.write().unwrap().push(("batch", totals.samples));
        }
    }

    #[test]
    fn metrics_recorder_observes_samples_and_batches() {
        let metrics = Arc::new(RecordingMetrics::new());
        set_eval_metrics(Some(metrics.clone()));

        let samples = vec![sample("a b", "a b"), sample("c", "c d")];
        let batch = evaluate_batch(&samples, &EvalConfig::default()).expect("batch");
        assert_eq!(batch.totals.samples, 2);

        let events = metrics.snapshot();
        assert!(events.iter().filter(|(kind, _)| *kind == "sample").count() >= 2);
        assert!(events.contains(&("batch", 2)));

        set_eval_metrics(None);
    }
}
