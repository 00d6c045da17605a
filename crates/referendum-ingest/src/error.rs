//! Error types for source loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::sources::SourceKind;

/// Errors that can occur while loading a source table.
///
/// Every variant names the source it came from; loading is all-or-nothing so
/// the first error aborts the whole load.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("{source_kind} source not found: {path}")]
    FileNotFound {
        source_kind: SourceKind,
        path: PathBuf,
    },

    /// Failed to read a source file.
    #[error("failed to read {source_kind} source {path}: {source}")]
    FileRead {
        source_kind: SourceKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {source_kind} source {path}")]
    UnsupportedEncoding {
        source_kind: SourceKind,
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse the delimited file with Polars.
    #[error("failed to parse {source_kind} source {path}: {message}")]
    CsvParse {
        source_kind: SourceKind,
        path: PathBuf,
        message: String,
    },

    // === Schema Errors ===
    /// Required column not found in the source header.
    #[error("required column '{column}' not found in {source_kind} source {path}")]
    MissingColumn {
        source_kind: SourceKind,
        column: String,
        path: PathBuf,
    },

    /// A count column holds a value that is not a whole number.
    #[error("invalid integer '{value}' in column '{column}' (row {row}) of {source_kind} source")]
    InvalidNumeric {
        source_kind: SourceKind,
        column: String,
        row: usize,
        value: String,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
