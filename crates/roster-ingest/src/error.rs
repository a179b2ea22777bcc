//! Error types for roster ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a workbook.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Sheet file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File name does not yield a usable sheet name.
    #[error("cannot derive a sheet name from {path}")]
    InvalidSheetName { path: PathBuf },

    // === Structural Errors ===
    /// The workbook holds no sheets at all.
    #[error("workbook contains no sheets")]
    NoSheets,

    /// A column the pipeline cannot run without is absent from every sheet.
    #[error("required column '{column}' not found in any sheet")]
    MissingColumn { column: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
