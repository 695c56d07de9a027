//! Textual rendering of an alignment trace.
//!
//! Presentation-only: nothing downstream consumes this output.

use werval_align::AlignmentEntry;

/// Renders the trace as three aligned lines:
///
/// ```text
/// REF: the quick brown fox
/// HYP: the quick crown
/// OPS: ✓   ✓     S     D
/// ```
///
/// Each column is padded to the widest of the reference token, the
/// hypothesis token, and the one-character op code (`✓`/`S`/`I`/`D`); a
/// missing side renders as blanks.
pub fn render_alignment(entries: &[AlignmentEntry]) -> String {
    let mut ref_line = String::from("REF:");
    let mut hyp_line = String::from("HYP:");
    let mut ops_line = String::from("OPS:");

    for entry in entries {
        let reference = entry.reference_token().unwrap_or("");
        let prediction = entry.prediction_token().unwrap_or("");
        let width = reference
            .chars()
            .count()
            .max(prediction.chars().count())
            .max(1);

        push_column(&mut ref_line, reference, width);
        push_column(&mut hyp_line, prediction, width);

        let mut op = [0u8; 4];
        push_column(&mut ops_line, entry.op_code().encode_utf8(&mut op), width);
    }

    format!("{ref_line}\n{hyp_line}\n{ops_line}")
}

fn push_column(line: &mut String, text: &str, width: usize) {
    line.push(' ');
    line.push_str(text);
    for _ in text.chars().count()..width {
        line.push(' ');
    }
}
