//! Error types for the fix and apply steps.
//!
//! "Nothing found" and "manual fix required" are ordinary values, not errors.
//! Only filesystem failures, out-of-range or edited targets, and bad issue
//! indices end up here.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("Invalid issue index {index} (scan has {len} issues)")]
    InvalidIndex { index: usize, len: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// The file shrank after the fix was synthesized.
    #[error("{file}: line {line} is out of range (file has {len} lines); re-scan before applying")]
    LineOutOfRange {
        file: String,
        line: usize,
        len: usize,
    },

    /// The line no longer reads what the fix was synthesized from: it was
    /// edited, or this fix was already applied.
    #[error("{file}: line {line} changed since the fix was computed; re-scan before applying")]
    StaleTarget { file: String, line: usize },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
