//! Workbook discovery: a directory of sheet CSVs.

use std::path::{Path, PathBuf};

use crate::csv::read_sheet;
use crate::error::{IngestError, Result};
use crate::workbook::Workbook;

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        // Check for .csv extension (case-insensitive)
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Reads every CSV in `dir` as one sheet, in file-name order.
pub fn read_workbook_dir(dir: &Path) -> Result<Workbook> {
    let files = list_csv_files(dir)?;
    let mut workbook = Workbook::new();
    for path in files {
        workbook.push_sheet(read_sheet(&path)?);
    }
    tracing::info!(
        path = %dir.display(),
        sheets = workbook.len(),
        "read workbook"
    );
    Ok(workbook)
}
