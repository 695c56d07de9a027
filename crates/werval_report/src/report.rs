//! Per-sample metrics derived from an alignment trace.

use serde::{Deserialize, Serialize};
use werval_align::{AlignmentEntry, ErrorDetail};

/// Aggregate error counts and rates for one `(reference, hypothesis)` pair,
/// together with the trace they were derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsReport {
    /// `(substitutions + insertions + deletions) / total_words`. Can exceed
    /// `1.0` when errors outnumber reference tokens; reported as `0.0` for an
    /// empty reference.
    pub wer: f64,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
    /// Token count of the original reference sequence (not the trace length).
    pub total_words: usize,
    pub substitution_rate: f64,
    pub insertion_rate: f64,
    pub deletion_rate: f64,
    /// The full alignment trace, in reading order.
    pub alignment: Vec<AlignmentEntry>,
    /// The non-correct entries, in trace order.
    pub detailed_errors: Vec<ErrorDetail>,
}

/// Per-kind slice of the error list for presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorGroup {
    pub count: usize,
    /// `count / total_words`, zero-guarded like every other rate.
    pub rate: f64,
    pub errors: Vec<ErrorDetail>,
}

/// The grouped presentation view: one [`ErrorGroup`] per error kind plus the
/// overall accuracy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBreakdown {
    pub substitutions: ErrorGroup,
    pub insertions: ErrorGroup,
    pub deletions: ErrorGroup,
    /// `1 − wer`. Negative when the hypothesis carries more errors than the
    /// reference has tokens.
    pub accuracy: f64,
}

/// Divides with the empty-reference policy: a zero denominator reports a
/// rate of `0.0` rather than NaN or an error.
pub(crate) fn guarded_rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Tallies an alignment trace into a [`MetricsReport`].
///
/// Pure function: the trace itself carries everything needed, including the
/// original reference length (the number of entries with a reference-side
/// position). Consumes the entries so the report can embed them without a
/// copy.
pub fn compute_metrics(alignment: Vec<AlignmentEntry>) -> MetricsReport {
    let mut substitutions = 0;
    let mut insertions = 0;
    let mut deletions = 0;
    let mut total_words = 0;

    for entry in &alignment {
        match entry {
            AlignmentEntry::Correct { .. } => total_words += 1,
            AlignmentEntry::Substitution { .. } => {
                substitutions += 1;
                total_words += 1;
            }
            AlignmentEntry::Insertion { .. } => insertions += 1,
            AlignmentEntry::Deletion { .. } => {
                deletions += 1;
                total_words += 1;
            }
        }
    }

    let detailed_errors = alignment
        .iter()
        .filter_map(AlignmentEntry::error_detail)
        .collect();

    MetricsReport {
        wer: guarded_rate(substitutions + insertions + deletions, total_words),
        substitutions,
        insertions,
        deletions,
        total_words,
        substitution_rate: guarded_rate(substitutions, total_words),
        insertion_rate: guarded_rate(insertions, total_words),
        deletion_rate: guarded_rate(deletions, total_words),
        alignment,
        detailed_errors,
    }
}

impl MetricsReport {
    /// Total error count across all kinds.
    pub fn error_total(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }

    /// Groups the detailed errors by kind for presentation layers.
    pub fn breakdown(&self) -> ErrorBreakdown {
        let mut substitutions = Vec::new();
        let mut insertions = Vec::new();
        let mut deletions = Vec::new();

        for error in &self.detailed_errors {
            match error {
                ErrorDetail::Substitution { .. } => substitutions.push(error.clone()),
                ErrorDetail::Insertion { .. } => insertions.push(error.clone()),
                ErrorDetail::Deletion { .. } => deletions.push(error.clone()),
            }
        }

        ErrorBreakdown {
            substitutions: ErrorGroup {
                count: substitutions.len(),
                rate: self.substitution_rate,
                errors: substitutions,
            },
            insertions: ErrorGroup {
                count: insertions.len(),
                rate: self.insertion_rate,
                errors: insertions,
            },
            deletions: ErrorGroup {
                count: deletions.len(),
                rate: self.deletion_rate,
                errors: deletions,
            },
            accuracy: 1.0 - self.wer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use werval_align::{align, AlignConfig};

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn report(reference: &str, hypothesis: &str) -> MetricsReport {
        let alignment = align(&toks(reference), &toks(hypothesis), &AlignConfig::default())
            .expect("within limits");
        compute_metrics(alignment.entries)
    }

    #[test]
    fn perfect_match_is_zero_wer() {
        let r = report("the quick brown fox", "the quick brown fox");
        assert_eq!(r.wer, 0.0);
        assert_eq!(r.total_words, 4);
        assert_eq!(r.error_total(), 0);
        assert_eq!(r.alignment.len(), 4);
    }

    #[test]
    fn substitution_rates() {
        let r = report("hello world", "hello word");
        assert_eq!(r.substitutions, 1);
        assert_eq!(r.wer, 0.5);
        assert_eq!(r.substitution_rate, 0.5);
        assert_eq!(r.insertion_rate, 0.0);
    }

    #[test]
    fn deletion_wer_is_one_third() {
        let r = report("a b c", "a c");
        assert_eq!(r.deletions, 1);
        assert_eq!(r.total_words, 3);
        assert!((r.wer - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_reference_zero_guard() {
        let r = report("", "hello");
        assert_eq!(r.total_words, 0);
        assert_eq!(r.insertions, 1);
        // Policy: rates report 0 instead of dividing by zero, but the trace
        // still shows the insertion.
        assert_eq!(r.wer, 0.0);
        assert_eq!(r.insertion_rate, 0.0);
        assert_eq!(r.alignment.len(), 1);
    }

    #[test]
    fn wer_can_exceed_one() {
        let r = report("a", "x y z");
        assert_eq!(r.total_words, 1);
        assert_eq!(r.error_total(), 3);
        assert_eq!(r.wer, 3.0);
    }

    #[test]
    fn counts_match_non_correct_entries() {
        let r = report("the cat sat on the mat", "a cat sat mat today");
        let non_correct = r
            .alignment
            .iter()
            .filter(|e| !matches!(e, AlignmentEntry::Correct { .. }))
            .count();
        assert_eq!(r.error_total(), non_correct);
        assert_eq!(r.detailed_errors.len(), non_correct);
        assert_eq!(
            r.wer,
            guarded_rate(r.error_total(), r.total_words),
        );
    }

    #[test]
    fn breakdown_groups_by_kind() {
        let r = report("a b c", "a x c d");
        let b = r.breakdown();
        assert_eq!(b.substitutions.count, 1);
        assert_eq!(b.insertions.count, 1);
        assert_eq!(b.deletions.count, 0);
        assert!((b.accuracy - (1.0 - r.wer)).abs() < 1e-12);
        assert!(matches!(
            b.substitutions.errors[0],
            ErrorDetail::Substitution { .. }
        ));
    }

    #[test]
    fn empty_trace_reports_all_zero() {
        let r = compute_metrics(Vec::new());
        assert_eq!(r.total_words, 0);
        assert_eq!(r.wer, 0.0);
        assert!(r.alignment.is_empty());
    }
}
