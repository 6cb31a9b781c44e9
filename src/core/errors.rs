//! RP-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, RpError>;

/// Top-level error type for the result printer.
#[derive(Debug, Error)]
pub enum RpError {
    #[error("[RP-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[RP-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[RP-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[RP-2001] malformed coverage data in {file} ({class}): {details}")]
    MalformedCoverage {
        file: String,
        class: String,
        details: String,
    },

    #[error("[RP-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[RP-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RpError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "RP-1001",
            Self::MissingConfig { .. } => "RP-1002",
            Self::ConfigParse { .. } => "RP-1003",
            Self::MalformedCoverage { .. } => "RP-2001",
            Self::Serialization { .. } => "RP-2101",
            Self::Io { .. } => "RP-3001",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for RpError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for RpError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
