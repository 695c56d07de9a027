//! Configuration and error types for the alignment stage.
//!
//! This module defines the public configuration surface for the aligner. It
//! is free of any I/O or environment-dependent behavior so that alignment is
//! a pure function of `(reference_tokens, hypothesis_tokens, config)`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for token alignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlignConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Upper bound on the token count of either input sequence.
    ///
    /// The cost matrix is `O(m·n)` in both time and space, so unbounded
    /// inputs are a resource-exhaustion risk. Sequences longer than this
    /// limit are rejected before any matrix memory is allocated.
    pub max_tokens: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_tokens: 8192,
        }
    }
}

impl AlignConfig {
    /// Validates internal consistency of this configuration.
    pub fn validate(&self) -> Result<(), AlignError> {
        if self.version == 0 {
            return Err(AlignError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.max_tokens == 0 {
            return Err(AlignError::InvalidConfigMaxTokens {
                max_tokens: self.max_tokens,
            });
        }
        Ok(())
    }
}

/// Which input sequence a size-limit error refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Reference,
    Hypothesis,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Reference => f.write_str("reference"),
            Side::Hypothesis => f.write_str("hypothesis"),
        }
    }
}

/// Errors returned by the alignment stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: max_tokens must be >= 1 (got {max_tokens})")]
    InvalidConfigMaxTokens { max_tokens: usize },

    #[error("{side} sequence has {len} tokens; limit is {max}")]
    SequenceTooLong {
        side: Side,
        len: usize,
        max: usize,
    },
}
