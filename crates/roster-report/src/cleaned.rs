use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use roster_model::Dataset;
use tracing::debug;

/// Write the cleaned dataset as CSV: present fields in canonical order,
/// missing values as empty cells.
pub fn write_cleaned_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let columns = dataset.columns();
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(columns.iter().map(|field| field.header()))
        .context("write cleaned header")?;
    for record in dataset {
        csv.write_record(
            columns
                .iter()
                .map(|field| record.display_value(*field).unwrap_or_default()),
        )
        .context("write cleaned row")?;
    }
    csv.flush().context("flush cleaned dataset")?;
    Ok(())
}

/// Export the cleaned dataset to `path`, creating parent directories.
pub fn export_cleaned_data(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_cleaned_csv(dataset, file).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = dataset.len(), "exported cleaned dataset");
    Ok(())
}
