//! # werval normalization
//!
//! This crate prepares raw transcripts for word-level alignment. Reference and
//! hypothesis texts are run through the same deterministic transformation so
//! that cosmetic differences (casing, punctuation, ragged whitespace) do not
//! register as recognition errors downstream.
//!
//! ## Core Responsibilities
//!
//! - **Case folding**: optionally lowercase the text with the
//!   locale-independent Unicode mapping.
//! - **Punctuation removal**: optionally replace every non-word,
//!   non-whitespace character with a single space. Replacement, not deletion:
//!   `"fox,dog"` must become `"fox dog"`, never `"foxdog"`.
//! - **Whitespace collapsing**: optionally collapse whitespace runs to one
//!   space and trim the edges.
//! - **Tokenization**: split the normalized text on whitespace into the token
//!   sequence the aligner consumes.
//!
//! The three transforms are independent switches on [`PreprocessOptions`] but
//! always apply in a fixed order (lowercase, then depunctuate, then collapse)
//! so the same option set yields the same text regardless of how it was built.
//! Normalization is total: any input string produces an output string, and an
//! empty result is a valid one.
//!
//! ## Example Usage
//!
//! ```
//! use werval_normalize::{normalize, tokenize, PreprocessOptions};
//!
//! let opts = PreprocessOptions::all();
//! let text = normalize("  Hello,  \n world!  ", &opts);
//! assert_eq!(text, "hello world");
//! assert_eq!(tokenize(&text), vec!["hello", "world"]);
//! ```

use serde::{Deserialize, Serialize};

/// Switches controlling transcript normalization.
///
/// Each switch is independent; all of them default to off, which makes the
/// default configuration tokenize the input verbatim. Serialization-friendly
/// so the record can arrive from CLI flags, YAML config, or an API payload.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Fold all characters to lowercase before comparing.
    pub lowercase: bool,
    /// Replace punctuation with spaces before tokenizing.
    pub remove_punctuation: bool,
    /// Collapse whitespace runs and trim leading/trailing whitespace.
    pub remove_extra_spaces: bool,
}

impl PreprocessOptions {
    /// All switches enabled: the usual configuration for case- and
    /// punctuation-insensitive WER.
    pub fn all() -> Self {
        Self {
            lowercase: true,
            remove_punctuation: true,
            remove_extra_spaces: true,
        }
    }
}

/// Applies the configured transforms to `text` in fixed order.
///
/// Disabled steps are no-ops; with every switch off the input passes through
/// unchanged. Always returns a string, possibly empty.
pub fn normalize(text: &str, opts: &PreprocessOptions) -> String {
    let mut out = if opts.lowercase {
        fold_lowercase(text)
    } else {
        text.to_string()
    };
    if opts.remove_punctuation {
        out = replace_punctuation(&out);
    }
    if opts.remove_extra_spaces {
        out = collapse_whitespace(&out);
    }
    out
}

/// Lowercases with the locale-independent Unicode mapping.
///
/// A single character can expand to several (e.g. İ), so this goes through
/// `char::to_lowercase` rather than a byte-wise fold.
fn fold_lowercase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out
}

/// Replaces every character that is neither a word character nor whitespace
/// with a single space.
///
/// Substituting a space instead of deleting keeps adjacent words separated
/// when the punctuation was the only thing between them.
fn replace_punctuation(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if is_word_char(ch) || ch.is_whitespace() {
            out.push(ch);
        } else {
            out.push(' ');
        }
    }
    out
}

/// Word characters: ASCII letters, digits, underscore, and the extended
/// Latin letter ranges U+00C0–U+024F and U+1E00–U+1EFF.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ('\u{00C0}'..='\u{024F}').contains(&ch)
        || ('\u{1E00}'..='\u{1EFF}').contains(&ch)
}

/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Splits normalized text into whitespace-delimited tokens, dropping empty
/// fragments. Token order is significant and preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

// -----------------------------
// Unit tests
// -----------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_pass_text_through() {
        let opts = PreprocessOptions::default();
        let input = "  Hello,  WORLD!  ";
        assert_eq!(normalize(input, &opts), input);
    }

    #[test]
    fn lowercase_only() {
        let opts = PreprocessOptions {
            lowercase: true,
            ..Default::default()
        };
        assert_eq!(normalize("Hello WORLD", &opts), "hello world");
        // Punctuation and spacing untouched.
        assert_eq!(normalize("A,  B!", &opts), "a,  b!");
    }

    #[test]
    fn punctuation_becomes_space_not_nothing() {
        let opts = PreprocessOptions {
            remove_punctuation: true,
            ..Default::default()
        };
        // No collapsing requested: the comma leaves a space behind.
        assert_eq!(normalize("fox,dog", &opts), "fox dog");
        assert_eq!(normalize("fox, dog", &opts), "fox  dog");
    }

    #[test]
    fn extended_latin_letters_survive_depunctuation() {
        let opts = PreprocessOptions {
            remove_punctuation: true,
            ..Default::default()
        };
        assert_eq!(normalize("café naïve señor", &opts), "café naïve señor");
        assert_eq!(normalize("Ẅ_9 ok", &opts), "Ẅ_9 ok");
        // Characters outside the word ranges are replaced.
        assert_eq!(normalize("a≠b", &opts), "a b");
    }

    #[test]
    fn collapse_whitespace_trims_and_flattens() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn fixed_transform_order() {
        // Depunctuation runs after lowercasing and before collapsing, so the
        // space left behind by "!" is folded away by the final step.
        let opts = PreprocessOptions::all();
        assert_eq!(normalize("Hello, world!", &opts), "hello world");
        assert_eq!(normalize("  It's   FINE.  ", &opts), "it s fine");
    }

    #[test]
    fn tokenize_drops_empty_fragments() {
        assert_eq!(tokenize("a  b   c"), vec!["a", "b", "c"]);
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn normalized_pair_compares_equal() {
        let opts = PreprocessOptions {
            lowercase: true,
            remove_punctuation: true,
            ..Default::default()
        };
        let reference = normalize("Hello, world!", &opts);
        let hypothesis = normalize("hello world", &opts);
        assert_eq!(tokenize(&reference), tokenize(&hypothesis));
    }
}
