//! # werval alignment
//!
//! Minimum-edit-distance alignment between two token sequences, the
//! algorithmic core of WER evaluation. The aligner is Wagner–Fischer with
//! unit costs, operating on whole tokens instead of characters: it builds
//! the full cost matrix bottom-up, then backtracks from the final cell to
//! produce an ordered trace of `correct` / `substitution` / `insertion` /
//! `deletion` entries together with the positions of the tokens involved.
//!
//! The aligner is configuration-driven and pure: the same token sequences
//! and [`AlignConfig`] always produce the same [`Alignment`]. When several
//! minimum-cost alignments exist, backtracking resolves ties with a fixed
//! priority (match, then substitution, then deletion, then insertion) so
//! output is deterministic for every input.
//!
//! Empty sequences are valid inputs (the trace degenerates to all
//! insertions or all deletions). The only failure mode is the explicit
//! `max_tokens` resource guard: the matrix is `O(m·n)` in time and space,
//! and oversized inputs are rejected before any allocation.
//!
//! ## Example Usage
//!
//! ```
//! use werval_align::{align, AlignConfig, AlignmentEntry};
//!
//! let reference = vec!["hello", "world"];
//! let hypothesis = vec!["hello", "word"];
//!
//! let alignment = align(&reference, &hypothesis, &AlignConfig::default())
//!     .expect("inputs are within limits");
//!
//! assert_eq!(alignment.distance, 1);
//! assert!(matches!(
//!     alignment.entries[1],
//!     AlignmentEntry::Substitution { .. }
//! ));
//! ```

mod config;
mod matrix;
mod trace;

pub use config::{AlignConfig, AlignError, Side};
pub use trace::{Alignment, AlignmentEntry, ErrorDetail};

use matrix::CostMatrix;

/// Aligns `hypothesis` against `reference` and classifies every token pair.
///
/// Entries come back in left-to-right reading order; positions on each entry
/// are zero-based indices into the original input sequences. The cost matrix
/// is an internal artifact and is dropped once the trace has been extracted.
pub fn align<S>(
    reference: &[S],
    hypothesis: &[S],
    cfg: &AlignConfig,
) -> Result<Alignment, AlignError>
where
    S: AsRef<str>,
{
    cfg.validate()?;
    check_length(Side::Reference, reference.len(), cfg.max_tokens)?;
    check_length(Side::Hypothesis, hypothesis.len(), cfg.max_tokens)?;

    let matrix = CostMatrix::build(reference, hypothesis);
    let entries = backtrack(&matrix, reference, hypothesis);
    let errors = entries.iter().filter_map(AlignmentEntry::error_detail).collect();

    Ok(Alignment {
        errors,
        distance: matrix.distance(),
        entries,
    })
}

fn check_length(side: Side, len: usize, max: usize) -> Result<(), AlignError> {
    if len > max {
        return Err(AlignError::SequenceTooLong { side, len, max });
    }
    Ok(())
}

/// Walks the matrix from `(m, n)` back to `(0, 0)`, emitting one entry per
/// step. Ties are resolved match > substitution > deletion > insertion, in
/// that order of preference.
fn backtrack<S: AsRef<str>>(
    matrix: &CostMatrix,
    reference: &[S],
    hypothesis: &[S],
) -> Vec<AlignmentEntry> {
    let mut i = reference.len();
    let mut j = hypothesis.len();
    let mut entries = Vec::with_capacity(i.max(j));

    while i > 0 || j > 0 {
        let tokens_equal =
            i > 0 && j > 0 && reference[i - 1].as_ref() == hypothesis[j - 1].as_ref();

        if tokens_equal {
            entries.push(AlignmentEntry::Correct {
                reference: reference[i - 1].as_ref().to_string(),
                prediction: hypothesis[j - 1].as_ref().to_string(),
                reference_pos: i - 1,
                prediction_pos: j - 1,
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && matrix.get(i, j) == matrix.get(i - 1, j - 1) + 1 {
            entries.push(AlignmentEntry::Substitution {
                reference: reference[i - 1].as_ref().to_string(),
                prediction: hypothesis[j - 1].as_ref().to_string(),
                reference_pos: i - 1,
                prediction_pos: j - 1,
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && matrix.get(i, j) == matrix.get(i - 1, j) + 1 {
            entries.push(AlignmentEntry::Deletion {
                reference: reference[i - 1].as_ref().to_string(),
                reference_pos: i - 1,
            });
            i -= 1;
        } else {
            debug_assert!(j > 0, "backtrack stuck at ({i}, {j})");
            entries.push(AlignmentEntry::Insertion {
                prediction: hypothesis[j - 1].as_ref().to_string(),
                prediction_pos: j - 1,
            });
            j -= 1;
        }
    }

    // Entries were collected walking backwards; flip into reading order.
    entries.reverse();
    entries
}

// -----------------------------
// Unit tests
// -----------------------------
