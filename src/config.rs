//! YAML configuration file support for werval.
//!
//! Lets users pin a full evaluation configuration (normalization switches,
//! alignment limits, batch behavior) in a single YAML file and load it at
//! runtime, so CLI invocations and CI jobs score transcripts with exactly
//! the same settings.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # werval evaluation configuration
//! version: "1.0"
//! name: "nightly-asr-eval"
//!
//! preprocess:
//!   lowercase: true
//!   remove_punctuation: true
//!   remove_extra_spaces: true
//!
//! align:
//!   version: 1
//!   max_tokens: 8192
//!
//! batch:
//!   use_parallel: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use werval_align::AlignConfig;
use werval_normalize::PreprocessOptions;

use crate::EvalConfig;

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WervalConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Normalization switches.
    #[serde(default)]
    pub preprocess: PreprocessYamlConfig,

    /// Alignment limits.
    #[serde(default)]
    pub align: AlignYamlConfig,

    /// Batch evaluation behavior.
    #[serde(default)]
    pub batch: BatchYamlConfig,
}

impl WervalConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: WervalConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        if self.align.version == 0 {
            return Err(ConfigLoadError::Validation(
                "align.version must be >= 1".to_string(),
            ));
        }
        if self.align.max_tokens == 0 {
            return Err(ConfigLoadError::Validation(
                "align.max_tokens must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts the file representation into the runtime [`EvalConfig`].
    pub fn to_eval_config(&self) -> EvalConfig {
        EvalConfig {
            preprocess: PreprocessOptions {
                lowercase: self.preprocess.lowercase,
                remove_punctuation: self.preprocess.remove_punctuation,
                remove_extra_spaces: self.preprocess.remove_extra_spaces,
            },
            align: AlignConfig {
                version: self.align.version,
                max_tokens: self.align.max_tokens,
            },
            use_parallel: self.batch.use_parallel,
        }
    }
}

impl Default for WervalConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            preprocess: PreprocessYamlConfig::default(),
            align: AlignYamlConfig::default(),
            batch: BatchYamlConfig::default(),
        }
    }
}

/// Normalization section. In a config file the switches default to on
/// (a pinned evaluation config almost always wants case- and
/// punctuation-insensitive scoring), unlike the library default, where an
/// absent options record means verbatim tokenization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessYamlConfig {
    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "true_value")]
    pub remove_punctuation: bool,

    #[serde(default = "true_value")]
    pub remove_extra_spaces: bool,
}

impl Default for PreprocessYamlConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_punctuation: true,
            remove_extra_spaces: true,
        }
    }
}

/// Alignment section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for AlignYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_tokens: default_max_tokens(),
        }
    }
}

/// Batch section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BatchYamlConfig {
    pub use_parallel: bool,
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_max_tokens() -> usize {
    AlignConfig::default().max_tokens
}
