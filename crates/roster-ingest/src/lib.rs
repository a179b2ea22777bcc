//! Roster ingestion utilities.
//!
//! A workbook is a set of named sheets, one per academic track. On disk a
//! workbook is a directory holding one CSV file per sheet; the file stem is
//! the sheet name and sheets are ordered by file name.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use roster_ingest::{merge_sheets, read_workbook_dir};
//!
//! let workbook = read_workbook_dir(Path::new("data/grades-2027"))?;
//! let raw = merge_sheets(workbook)?;
//! ```

mod csv;
mod discovery;
mod error;
mod merge;
mod polars_utils;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_sheet, sheet_from_frame};

// === File Discovery ===
pub use discovery::{list_csv_files, read_workbook_dir};

// === Merging ===
pub use merge::{load_workbook, merge_sheets};

// === Workbook Types ===
pub use workbook::{Sheet, Workbook};
