//! Error types for data source operations.

use std::path::PathBuf;

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Error type for data source operations.
///
/// `DataUnavailable` is surfaced to the caller and never retried here;
/// model failures are recovered by the forecast service's persistence
/// fallback and normally do not appear in results at all.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A required input file or model is missing.
    #[error("required data unavailable: {path}")]
    DataUnavailable { path: PathBuf },

    /// An input file exists but could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// An input file exists but could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Configuration or initialization error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Remote endpoint error.
    #[cfg(feature = "remote-source")]
    #[error("remote source error: {0}")]
    Remote(String),
}

impl SourceError {
    pub fn unavailable(path: impl Into<PathBuf>) -> Self {
        Self::DataUnavailable { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error means the underlying data simply does not exist.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}
