//! Dataset-level aggregation.
//!
//! Batch WER is the ratio of summed error counts to summed reference token
//! counts, never the mean of per-sample rates. [`BatchTotals`] is therefore
//! a plain sum over per-sample counts with a commutative, associative
//! `merge`, so a fold over any partitioning of the samples (sequential or
//! parallel) produces the same result.

use serde::{Deserialize, Serialize};

use crate::report::{guarded_rate, MetricsReport};

/// Summed error counts across a set of samples.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchTotals {
    pub samples: usize,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub total_words: usize,
}

impl BatchTotals {
    /// Totals for a single sample.
    pub fn from_report(report: &MetricsReport) -> Self {
        Self {
            samples: 1,
            substitutions: report.substitutions,
            insertions: report.insertions,
            deletions: report.deletions,
            total_words: report.total_words,
        }
    }

    /// Combines two partial aggregations. Commutative and associative.
    pub fn merge(self, other: Self) -> Self {
        Self {
            samples: self.samples + other.samples,
            substitutions: self.substitutions + other.substitutions,
            insertions: self.insertions + other.insertions,
            deletions: self.deletions + other.deletions,
            total_words: self.total_words + other.total_words,
        }
    }

    pub fn error_total(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }

    /// Batch WER over the summed counts; `0.0` when no reference tokens were
    /// seen (same zero-guard as the per-sample rates).
    pub fn wer(&self) -> f64 {
        guarded_rate(self.error_total(), self.total_words)
    }

    pub fn substitution_rate(&self) -> f64 {
        guarded_rate(self.substitutions, self.total_words)
    }

    pub fn insertion_rate(&self) -> f64 {
        guarded_rate(self.insertions, self.total_words)
    }

    pub fn deletion_rate(&self) -> f64 {
        guarded_rate(self.deletions, self.total_words)
    }

    pub fn accuracy(&self) -> f64 {
        1.0 - self.wer()
    }
}

impl std::iter::Sum for BatchTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::merge)
    }
}

impl<'a> std::iter::Sum<&'a MetricsReport> for BatchTotals {
    fn sum<I: Iterator<Item = &'a MetricsReport>>(iter: I) -> Self {
        iter.map(Self::from_report).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::compute_metrics;
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
    fn batch_wer_is_ratio_of_sums() {
        // 4 words / 1 error and 6 words / 2 errors: overall 3/10, not the
        // mean of 0.25 and 0.333.
        let a = report("one two three four", "one two three more");
        let b = report("a b c d e f", "a b c d x");
        assert_eq!(a.total_words, 4);
        assert_eq!(a.error_total(), 1);
        assert_eq!(b.total_words, 6);
        assert_eq!(b.error_total(), 2);

        let totals: BatchTotals = [&a, &b].into_iter().sum();
        assert_eq!(totals.samples, 2);
        assert_eq!(totals.wer(), 0.3);
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let reports = [
            report("a b", "a b"),
            report("c d e", "c x e"),
            report("", "ghost words"),
            report("f", "f g h"),
        ];
        let parts: Vec<BatchTotals> = reports.iter().map(BatchTotals::from_report).collect();

        let left_fold: BatchTotals = parts.iter().copied().sum();
        let right_fold = parts
            .iter()
            .rev()
            .copied()
            .fold(BatchTotals::default(), BatchTotals::merge);
        assert_eq!(left_fold, right_fold);

        let pairwise = parts[0]
            .merge(parts[1])
            .merge(parts[2].merge(parts[3]));
        assert_eq!(left_fold, pairwise);
    }

    #[test]
    fn empty_batch_zero_guard() {
        let totals = BatchTotals::default();
        assert_eq!(totals.wer(), 0.0);
        assert_eq!(totals.accuracy(), 1.0);
    }

    #[test]
    fn insertions_count_even_without_reference_words() {
        let r = report("", "hello there");
        let totals = BatchTotals::from_report(&r);
        assert_eq!(totals.insertions, 2);
        assert_eq!(totals.total_words, 0);
        assert_eq!(totals.wer(), 0.0);
    }
}
