//! Loader/merger: concatenates sheets into one raw dataset tagged by track.

use std::collections::BTreeSet;
use std::path::Path;

use roster_model::{Field, RawDataset, RawRecord};
use tracing::{debug, info, warn};

use crate::discovery::read_workbook_dir;
use crate::error::{IngestError, Result};
use crate::workbook::Workbook;

/// Merge all sheets of a workbook into a single raw dataset.
///
/// Sheets are concatenated in workbook order and rows keep their order
/// within a sheet. Every row's `Track` is set to its sheet name, replacing
/// any `Track` column the sheet carries. Columns outside the roster schema
/// are dropped.
///
/// # Errors
///
/// Returns [`IngestError::NoSheets`] for an empty workbook and
/// [`IngestError::MissingColumn`] when a required identity column appears in
/// no sheet.
pub fn merge_sheets(workbook: Workbook) -> Result<RawDataset> {
    if workbook.is_empty() {
        return Err(IngestError::NoSheets);
    }

    let mut fields = BTreeSet::from([Field::Track]);
    let mut layouts = Vec::with_capacity(workbook.len());
    for sheet in workbook.sheets() {
        let mut unknown = Vec::new();
        let layout: Vec<Option<Field>> = sheet
            .headers
            .iter()
            .map(|header| {
                let field = Field::from_header(header);
                if field.is_none() {
                    unknown.push(header.as_str());
                }
                field.filter(|field| *field != Field::Track)
            })
            .collect();
        if !unknown.is_empty() {
            warn!(
                sheet = %sheet.name,
                columns = ?unknown,
                "ignoring columns outside the roster schema"
            );
        }
        fields.extend(layout.iter().flatten().copied());
        layouts.push(layout);
    }

    if let Some(missing) = Field::REQUIRED
        .into_iter()
        .find(|field| !fields.contains(field))
    {
        return Err(IngestError::MissingColumn {
            column: missing.header().to_string(),
        });
    }

    let mut dataset = RawDataset::new(fields);
    for (sheet, layout) in workbook.into_sheets().into_iter().zip(layouts) {
        let rows = sheet.rows.len();
        for row in sheet.rows {
            let mut record = RawRecord::new();
            for (field, cell) in layout.iter().zip(row) {
                if let (Some(field), Some(value)) = (field, cell) {
                    record.set(*field, value);
                }
            }
            record.set(Field::Track, sheet.name.clone());
            dataset.push_record(record);
        }
        debug!(sheet = %sheet.name, rows, "merged sheet");
    }

    info!(
        rows = dataset.len(),
        fields = dataset.fields.len(),
        "merged workbook"
    );
    Ok(dataset)
}

/// Read a workbook directory and merge its sheets.
pub fn load_workbook(dir: &Path) -> Result<RawDataset> {
    merge_sheets(read_workbook_dir(dir)?)
}
