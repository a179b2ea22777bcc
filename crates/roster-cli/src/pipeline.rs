//! Roster processing pipeline with explicit stages.
//!
//! 1. **Load**: read every sheet of a workbook directory and merge them
//! 2. **Clean**: normalize, validate, impute, filter and deduplicate
//! 3. **Aggregate**: compute the summary tables and key metrics
//! 4. **Report**: write the cleaned dataset, tables and JSON report

use std::path::Path;

use anyhow::{Context, Result};
use roster_clean::clean_and_dedupe;
use roster_ingest::load_workbook;
use roster_model::{Dataset, RawDataset, SummaryBook};
use roster_report::{ReportOptions, ReportPaths, write_report};
use roster_stats::{KeyMetrics, compute_all_stats, key_metrics};
use tracing::{info, info_span, warn};

/// Process exit status when rows were merged but none survived cleaning.
pub const EXIT_NO_SURVIVORS: i32 = 2;

/// Everything computed from one workbook.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Rows merged from all sheets, before cleaning.
    pub merged_rows: usize,
    pub dataset: Dataset,
    pub book: SummaryBook,
    pub metrics: KeyMetrics,
}

impl PipelineOutput {
    pub fn dropped_rows(&self) -> usize {
        self.merged_rows.saturating_sub(self.dataset.len())
    }

    /// The workbook had rows, yet cleaning rejected every one of them.
    pub fn all_rows_dropped(&self) -> bool {
        self.merged_rows > 0 && self.dataset.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_rows_dropped() {
            EXIT_NO_SURVIVORS
        } else {
            0
        }
    }
}

pub fn load_stage(workbook_dir: &Path) -> Result<RawDataset> {
    let span = info_span!("load", dir = %workbook_dir.display());
    let _guard = span.enter();
    load_workbook(workbook_dir).with_context(|| format!("load {}", workbook_dir.display()))
}

/// Clean, aggregate and summarize an already merged dataset.
pub fn process(raw: RawDataset) -> PipelineOutput {
    let merged_rows = raw.len();
    let dataset = clean_and_dedupe(raw);
    let book = compute_all_stats(&dataset);
    let metrics = key_metrics(&dataset);
    info!(
        merged_rows,
        kept = dataset.len(),
        tables = book.len(),
        "processed roster"
    );
    let output = PipelineOutput {
        merged_rows,
        dataset,
        book,
        metrics,
    };
    if output.all_rows_dropped() {
        warn!(merged_rows, "no rows survived cleaning");
    }
    output
}

pub fn run_pipeline(workbook_dir: &Path) -> Result<PipelineOutput> {
    let raw = load_stage(workbook_dir)?;
    Ok(process(raw))
}

pub fn report_stage(output: &PipelineOutput, options: &ReportOptions) -> Result<ReportPaths> {
    let span = info_span!("report", dir = %options.output_dir.display());
    let _guard = span.enter();
    write_report(&output.dataset, &output.book, &output.metrics, options)
}
