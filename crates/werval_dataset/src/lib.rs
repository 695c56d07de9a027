//! Dataset ingestion for WER evaluation.
//!
//! Provides the public API for loading `(reference, prediction)` sample
//! pairs from the two row-oriented formats evaluation datasets arrive in:
//! delimited tables (CSV/TSV with a header row) and JSON arrays of records.
//! Column and key detection is deliberately fuzzy (any header containing a
//! reference-like or prediction-like name is accepted) so datasets exported
//! from different tools load without renaming.
//!
//! Malformed input is rejected here with a descriptive [`DatasetError`];
//! the evaluation core downstream only ever sees well-formed pairs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Header substrings accepted for the reference (ground-truth) column.
pub const REFERENCE_ALIASES: &[&str] = &["reference", "ref", "truth", "transcript", "target"];

/// Header substrings accepted for the prediction (hypothesis) column.
pub const PREDICTION_ALIASES: &[&str] = &["prediction", "predicted", "hypothesis", "pred", "hyp", "output"];

/// One evaluation sample: a reference transcript and the hypothesis to score
/// against it. This is the only shape the evaluation core consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sample {
    pub reference: String,
    pub prediction: String,
}

/// Supported dataset encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Header + rows, fields separated by `delimiter` with double-quote
    /// escaping.
    Delimited { delimiter: char },
    /// Top-level JSON array of objects.
    Json,
}

impl DatasetFormat {
    /// Guesses the format from a file extension (`csv`, `tsv`, `json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Delimited { delimiter: ',' }),
            "tsv" => Some(Self::Delimited { delimiter: '\t' }),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Errors produced while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot infer dataset format from path {path:?}; expected csv, tsv, or json")]
    UnknownFormat { path: String },

    #[error("dataset has no data rows")]
    Empty,

    #[error("no header column matches a reference name (accepted substrings: {aliases:?})")]
    MissingReferenceColumn { aliases: &'static [&'static str] },

    #[error("no header column matches a prediction name (accepted substrings: {aliases:?})")]
    MissingPredictionColumn { aliases: &'static [&'static str] },

    #[error("row {row}: expected {expected} fields, got {got}")]
    RowFieldCount {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("JSON dataset must be a top-level array of records")]
    NotAnArray,

    #[error("record {index}: no {role} field under an accepted key (accepted: {aliases:?})")]
    RecordMissingKey {
        index: usize,
        role: &'static str,
        aliases: &'static [&'static str],
    },
}

/// Loads samples from `path`, inferring the format from the extension.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>, DatasetError> {
    let format = DatasetFormat::from_path(path).ok_or_else(|| DatasetError::UnknownFormat {
        path: path.display().to_string(),
    })?;
    load_samples_as(path, format)
}

/// Loads samples from `path` with an explicit format.
pub fn load_samples_as(path: &Path, format: DatasetFormat) -> Result<Vec<Sample>, DatasetError> {
    let result = fs::read_to_string(path)
        .map_err(DatasetError::from)
        .and_then(|content| match format {
            DatasetFormat::Delimited { delimiter } => parse_delimited(&content, delimiter),
            DatasetFormat::Json => parse_json(&content),
        });

    match &result {
        Ok(samples) => {
            info!(
                path = %path.display(),
                samples = samples.len(),
                "dataset_loaded"
            );
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "dataset_failure");
        }
    }
    result
}

/// Parses a delimited table with a header row.
///
/// The reference and prediction columns are located by case-insensitive
/// substring matching against the accepted alias lists; a column that also
/// looks prediction-like is never chosen as the reference (so a header such
/// as `predicted_transcript` does not shadow `transcript`). Blank lines are
/// skipped; every data row must have at least as many fields as the header.
pub fn parse_delimited(content: &str, delimiter: char) -> Result<Vec<Sample>, DatasetError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(DatasetError::Empty)?;
    let header = split_fields(header_line, delimiter);

    let prediction_idx = header
        .iter()
        .position(|name| matches_any(name, PREDICTION_ALIASES))
        .ok_or(DatasetError::MissingPredictionColumn {
            aliases: PREDICTION_ALIASES,
        })?;
    let reference_idx = header
        .iter()
        .position(|name| matches_any(name, REFERENCE_ALIASES) && !matches_any(name, PREDICTION_ALIASES))
        .ok_or(DatasetError::MissingReferenceColumn {
            aliases: REFERENCE_ALIASES,
        })?;

    let mut samples = Vec::new();
    for (lineno, line) in lines {
        let fields = split_fields(line, delimiter);
        if fields.len() < header.len() {
            return Err(DatasetError::RowFieldCount {
                row: lineno + 1,
                expected: header.len(),
                got: fields.len(),
            });
        }
        samples.push(Sample {
            reference: fields[reference_idx].clone(),
            prediction: fields[prediction_idx].clone(),
        });
    }

    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(samples)
}

/// Parses a JSON array of records, each exposing the reference and the
/// prediction under one of the accepted key aliases (exact, case-insensitive
/// key match). Non-array input is rejected.
pub fn parse_json(content: &str) -> Result<Vec<Sample>, DatasetError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let records = value.as_array().ok_or(DatasetError::NotAnArray)?;

    let mut samples = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let reference = lookup_key(record, REFERENCE_ALIASES).ok_or(
            DatasetError::RecordMissingKey {
                index,
                role: "reference",
                aliases: REFERENCE_ALIASES,
            },
        )?;
        let prediction = lookup_key(record, PREDICTION_ALIASES).ok_or(
            DatasetError::RecordMissingKey {
                index,
                role: "prediction",
                aliases: PREDICTION_ALIASES,
            },
        )?;
        samples.push(Sample {
            reference: reference.to_string(),
            prediction: prediction.to_string(),
        });
    }

    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(samples)
}

fn matches_any(name: &str, aliases: &[&str]) -> bool {
    let lower = name.trim().to_lowercase();
    aliases.iter().any(|alias| lower.contains(alias))
}

fn lookup_key<'a>(record: &'a serde_json::Value, aliases: &[&str]) -> Option<&'a str> {
    let object = record.as_object()?;
    for alias in aliases {
        for (key, value) in object {
            if key.to_lowercase() == *alias {
                return value.as_str();
            }
        }
    }
    None
}

/// Splits one delimited line into fields, honoring double-quoted fields with
/// `""` escapes. Quoted newlines are not supported; datasets are treated as
/// strictly line-oriented.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' && field.is_empty() {
            in_quotes = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    fields.push(field);
    fields
}
