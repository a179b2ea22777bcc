use std::path::{Path, PathBuf};

use anyhow::Result;
use roster_model::{Dataset, SummaryBook};
use roster_stats::KeyMetrics;
use tracing::info;

use crate::{export_cleaned_data, export_summary_report, export_summary_tables};

pub const DEFAULT_CLEANED_FILE: &str = "cleaned_dataset.csv";
pub const DEFAULT_REPORT_FILE: &str = "summary_report.json";
pub const DEFAULT_TABLES_DIR: &str = "tables";

/// Where report outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    pub cleaned_file_name: String,
    pub report_file_name: String,
    pub tables_dir_name: String,
}

impl ReportOptions {
    /// Default file names under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            cleaned_file_name: DEFAULT_CLEANED_FILE.to_string(),
            report_file_name: DEFAULT_REPORT_FILE.to_string(),
            tables_dir_name: DEFAULT_TABLES_DIR.to_string(),
        }
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file_name)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.output_dir.join(&self.tables_dir_name)
    }
}

/// Paths written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub cleaned: PathBuf,
    pub report: PathBuf,
    pub tables: Vec<PathBuf>,
}

impl ReportPaths {
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        [self.cleaned.as_path(), self.report.as_path()]
            .into_iter()
            .chain(self.tables.iter().map(PathBuf::as_path))
    }
}

/// Write the cleaned dataset, every summary table and the JSON report.
pub fn write_report(
    dataset: &Dataset,
    book: &SummaryBook,
    metrics: &KeyMetrics,
    options: &ReportOptions,
) -> Result<ReportPaths> {
    let cleaned = options.cleaned_path();
    export_cleaned_data(dataset, &cleaned)?;
    let tables = export_summary_tables(book, &options.tables_dir())?;
    let report = options.report_path();
    export_summary_report(book, metrics, &report)?;

    info!(
        output_dir = %options.output_dir.display(),
        tables = tables.len(),
        "wrote report"
    );
    Ok(ReportPaths {
        cleaned,
        report,
        tables,
    })
}
