use std::path::Path;

use anyhow::{Context, Result};
use roster_model::SummaryBook;
use roster_stats::KeyMetrics;
use serde::Serialize;
use tracing::debug;

pub const REPORT_SCHEMA: &str = "roster.summary-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct SummaryReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    metrics: &'a KeyMetrics,
    tables: &'a SummaryBook,
}

/// Pretty JSON document with the key metrics and every table in book order.
pub fn summary_report_json(book: &SummaryBook, metrics: &KeyMetrics) -> Result<String> {
    let payload = SummaryReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        metrics,
        tables: book,
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize summary report")?;
    Ok(format!("{json}\n"))
}

pub fn export_summary_report(book: &SummaryBook, metrics: &KeyMetrics, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let json = summary_report_json(book, metrics)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), tables = book.len(), "exported summary report");
    Ok(())
}
