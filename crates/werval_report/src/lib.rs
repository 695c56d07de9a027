//! # werval reporting
//!
//! ## Purpose
//!
//! `werval_report` sits on top of the alignment layer (`werval_align`) and
//! turns alignment traces into the numbers and views consumers actually
//! want: per-sample WER with substitution/insertion/deletion counts and
//! rates, a per-kind error breakdown for presentation layers, dataset-level
//! totals, and a columnar text rendering of a trace.
//!
//! ## Core Types
//!
//! - [`MetricsReport`]: per-sample counts, rates, and the embedded trace.
//! - [`ErrorBreakdown`] / [`ErrorGroup`]: errors grouped by kind, with
//!   `accuracy = 1 − wer`.
//! - [`BatchTotals`]: associative aggregation across samples; batch WER is
//!   the ratio of summed counts, regardless of fold order or parallelism.
//! - [`render_alignment`]: the three-line `REF:`/`HYP:`/`OPS:` view.
//!
//! Everything here is a pure function over immutable inputs; the
//! empty-reference zero-guard (rates report `0.0` when there are no
//! reference tokens) is applied uniformly to per-sample and batch rates.

mod batch;
mod render;
mod report;

pub use batch::BatchTotals;
pub use render::render_alignment;
pub use report::{compute_metrics, ErrorBreakdown, ErrorGroup, MetricsReport};
