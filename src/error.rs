//! Unified error types for roster-diff.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for roster-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO errors with the path that produced them
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV-level read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from an input header row
    #[error("missing required column '{column}' in {path:?}")]
    MissingColumn { column: String, path: PathBuf },

    /// A cell value violates the input contract (unknown verdict string,
    /// non-numeric grade, ...). Aborts the run: a corrupted adjudication
    /// artifact must never silently produce an incorrect match.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// Invalid configuration or unusable input location
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Report generation errors
    #[error("report generation failed: {0}")]
    Report(String),
}

/// Convenient Result type for roster-diff operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a data-format error
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat(message.into())
    }

    /// Create a missing-column error
    pub fn missing_column(column: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            path: path.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report(message.into())
    }
}
