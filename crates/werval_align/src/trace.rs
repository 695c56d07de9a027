//! Alignment trace types.
//!
//! The trace is the public contract of this crate: an ordered sequence of
//! classified correspondences between reference and hypothesis tokens, plus
//! a reduced error-only projection for consumers that do not care about
//! matched tokens.

use serde::{Deserialize, Serialize};

/// One aligned unit, tagged with how the hypothesis token relates to the
/// reference token at that point in the traversal.
///
/// Positions are zero-based indices into the original token sequences; a
/// side that does not participate (the reference of an insertion, the
/// hypothesis of a deletion) carries no token and no position. Entries are
/// produced in left-to-right reading order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AlignmentEntry {
    /// Reference and hypothesis tokens are equal.
    Correct {
        reference: String,
        prediction: String,
        reference_pos: usize,
        prediction_pos: usize,
    },
    /// The hypothesis token replaces a different reference token.
    Substitution {
        reference: String,
        prediction: String,
        reference_pos: usize,
        prediction_pos: usize,
    },
    /// The hypothesis contains a token with no reference counterpart.
    Insertion {
        prediction: String,
        prediction_pos: usize,
    },
    /// A reference token is missing from the hypothesis.
    Deletion {
        reference: String,
        reference_pos: usize,
    },
}

impl AlignmentEntry {
    /// The reference-side token, if this entry has one.
    pub fn reference_token(&self) -> Option<&str> {
        match self {
            AlignmentEntry::Correct { reference, .. }
            | AlignmentEntry::Substitution { reference, .. }
            | AlignmentEntry::Deletion { reference, .. } => Some(reference),
            AlignmentEntry::Insertion { .. } => None,
        }
    }

    /// The hypothesis-side token, if this entry has one.
    pub fn prediction_token(&self) -> Option<&str> {
        match self {
            AlignmentEntry::Correct { prediction, .. }
            | AlignmentEntry::Substitution { prediction, .. }
            | AlignmentEntry::Insertion { prediction, .. } => Some(prediction),
            AlignmentEntry::Deletion { .. } => None,
        }
    }

    /// Zero-based position in the original reference sequence, if the
    /// reference side participates.
    pub fn reference_pos(&self) -> Option<usize> {
        match self {
            AlignmentEntry::Correct { reference_pos, .. }
            | AlignmentEntry::Substitution { reference_pos, .. }
            | AlignmentEntry::Deletion { reference_pos, .. } => Some(*reference_pos),
            AlignmentEntry::Insertion { .. } => None,
        }
    }

    /// Zero-based position in the original hypothesis sequence, if the
    /// hypothesis side participates.
    pub fn prediction_pos(&self) -> Option<usize> {
        match self {
            AlignmentEntry::Correct { prediction_pos, .. }
            | AlignmentEntry::Substitution { prediction_pos, .. }
            | AlignmentEntry::Insertion { prediction_pos, .. } => Some(*prediction_pos),
            AlignmentEntry::Deletion { .. } => None,
        }
    }

    /// Single-character op code used by textual renderings.
    pub fn op_code(&self) -> char {
        match self {
            AlignmentEntry::Correct { .. } => '✓',
            AlignmentEntry::Substitution { .. } => 'S',
            AlignmentEntry::Insertion { .. } => 'I',
            AlignmentEntry::Deletion { .. } => 'D',
        }
    }

    /// Projects a non-correct entry into its [`ErrorDetail`] form.
    pub fn error_detail(&self) -> Option<ErrorDetail> {
        match self {
            AlignmentEntry::Correct { .. } => None,
            AlignmentEntry::Substitution {
                reference,
                prediction,
                reference_pos,
                prediction_pos,
            } => Some(ErrorDetail::Substitution {
                reference: reference.clone(),
                prediction: prediction.clone(),
                reference_pos: *reference_pos,
                prediction_pos: *prediction_pos,
            }),
            AlignmentEntry::Insertion {
                prediction,
                prediction_pos,
            } => Some(ErrorDetail::Insertion {
                prediction: prediction.clone(),
                prediction_pos: *prediction_pos,
            }),
            AlignmentEntry::Deletion {
                reference,
                reference_pos,
            } => Some(ErrorDetail::Deletion {
                reference: reference.clone(),
                reference_pos: *reference_pos,
            }),
        }
    }
}

/// Error-only view of the trace, carrying only the fields relevant to each
/// error kind: no empty-string placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ErrorDetail {
    Substitution {
        reference: String,
        prediction: String,
        reference_pos: usize,
        prediction_pos: usize,
    },
    Insertion {
        prediction: String,
        prediction_pos: usize,
    },
    Deletion {
        reference: String,
        reference_pos: usize,
    },
}

/// Output of the alignment stage: the full trace, the error projection, and
/// the total edit distance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alignment {
    /// Ordered alignment trace, one entry per aligned unit.
    pub entries: Vec<AlignmentEntry>,
    /// The non-correct entries, in the same order as they appear in
    /// `entries`.
    pub errors: Vec<ErrorDetail>,
    /// Minimum substitutions + insertions + deletions between the inputs.
    pub distance: u32,
}
