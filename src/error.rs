//! Error types for the customer ETL pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the extract, load, and export stages.
///
/// Extraction errors abort a run. Load and export errors are collected into
/// the [`PipelineReport`](crate::etl::PipelineReport) so the remaining
/// outputs are still attempted.
#[derive(Debug, Error)]
pub enum EtlError {
    // === Extraction ===
    /// The source CSV file does not exist.
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The source file exists but could not be read or parsed as CSV.
    #[error("failed to read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the source header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A data row has more cells than the header names.
    #[error("row {row} of {path} has {found} fields, expected at most {expected}")]
    ExtraFields {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    // === Load ===
    /// Writing the relational table failed.
    #[error("failed to load into {destination}: {source}")]
    LoadFailure {
        destination: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Writing the flat export file failed.
    #[error("failed to export {path}: {source}")]
    ExportFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl EtlError {
    /// Whether this error happened before any data was available.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::SourceRead { .. }
                | Self::MissingColumn { .. }
                | Self::ExtraFields { .. }
        )
    }
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, EtlError>;
