//! Error types for benchmark loading.
//!
//! Nothing in the loader recovers from an error: the first failure aborts the
//! directory scan and is handed back to the caller unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// A benchmark file name that does not follow `<size>-<table>-<algo>-<kind>.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Fewer than four hyphen-delimited segments.
    #[error("'{name}' has too few '-' segments, expected <size>-<table>-<algo>-<kind>.csv")]
    TooFewSegments { name: String },

    /// The path has no final segment or it is not valid UTF-8.
    #[error("'{path}' has no usable file name")]
    NoFileName { path: PathBuf },
}

/// Problems with the cells of an in-memory [`Frame`](crate::data::model::Frame).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("column '{column}', row {row}: '{value}' is not a number")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("no numeric values to average")]
    Empty,

    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Primary error type for everything the loader does.
#[derive(Debug, Error)]
pub enum LoadError {
    // ========== Filesystem ==========
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ========== File names ==========
    #[error(transparent)]
    Name(#[from] NameError),

    // ========== Content ==========
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("bad table data in {path}: {source}")]
    Frame {
        path: PathBuf,
        #[source]
        source: FrameError,
    },

    // ========== Ordering ==========
    /// A retrieval file whose (table, algorithm) pair has no primary file.
    #[error("{path}: no primary measurements for table '{table}', algorithm '{algorithm}'")]
    MissingPrimary {
        table: String,
        algorithm: String,
        path: PathBuf,
    },

    // ========== Configuration ==========
    #[error("invalid loader config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
