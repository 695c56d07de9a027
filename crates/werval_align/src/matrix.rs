//! Edit-distance cost matrix.
//!
//! The matrix is `(m+1) × (n+1)` where `m` is the reference token count and
//! `n` the hypothesis token count. `cell(i, j)` holds the minimum number of
//! substitutions, insertions, and deletions needed to turn the first `i`
//! reference tokens into the first `j` hypothesis tokens. Backtracking needs
//! random access to every cell, so the table is fully materialized and then
//! discarded once the trace has been extracted.

/// Fully materialized cost table backed by a flat row-major buffer.
///
/// Cell values never exceed `max(m, n)`, which the caller bounds via
/// `AlignConfig::max_tokens`, so `u32` cells suffice.
pub(crate) struct CostMatrix {
    cells: Vec<u32>,
    cols: usize,
}

impl CostMatrix {
    /// Builds the table bottom-up with unit costs.
    ///
    /// First row and column are the all-insertion / all-deletion baselines;
    /// every interior cell is either a zero-cost match on equal tokens or
    /// one plus the cheapest of its substitution, deletion, and insertion
    /// predecessors.
    pub(crate) fn build<S: AsRef<str>>(reference: &[S], hypothesis: &[S]) -> Self {
        let rows = reference.len() + 1;
        let cols = hypothesis.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for i in 1..rows {
            cells[i * cols] = i as u32;
        }
        for j in 1..cols {
            cells[j] = j as u32;
        }

        for i in 1..rows {
            let row = i * cols;
            let prev_row = row - cols;
            for j in 1..cols {
                cells[row + j] = if reference[i - 1].as_ref() == hypothesis[j - 1].as_ref() {
                    cells[prev_row + j - 1]
                } else {
                    let substitution = cells[prev_row + j - 1];
                    let deletion = cells[prev_row + j];
                    let insertion = cells[row + j - 1];
                    1 + substitution.min(deletion).min(insertion)
                };
            }
        }

        Self { cells, cols }
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    /// Total edit distance: the bottom-right cell.
    pub(crate) fn distance(&self) -> u32 {
        self.cells[self.cells.len() - 1]
    }
}
