//! Reads one sheet CSV into a [`Sheet`] with every column kept as text.

use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_cell;
use crate::workbook::Sheet;

/// Reads a CSV file as a sheet named after the file stem.
///
/// Schema inference is disabled so every column is loaded as a string; type
/// coercion is the cleaning pipeline's job.
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let name = sheet_name(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        sheet = %name,
        rows = df.height(),
        columns = df.width(),
        "read sheet"
    );
    Ok(sheet_from_frame(name, &df))
}

/// Converts a DataFrame into a sheet, row by row.
pub fn sheet_from_frame(name: impl Into<String>, df: &DataFrame) -> Sheet {
    let headers: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut sheet = Sheet::new(name, headers);
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|column| any_to_cell(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        sheet.push_row(row);
    }
    sheet
}

fn sheet_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::trim)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| IngestError::InvalidSheetName {
            path: path.to_path_buf(),
        })
}
