use std::path::PathBuf;

use roster_cli::pipeline::PipelineOutput;
use roster_report::ReportPaths;

#[derive(Debug)]
pub struct ReportResult {
    pub workbook_dir: PathBuf,
    pub output: PipelineOutput,
    /// `None` for dry runs.
    pub paths: Option<ReportPaths>,
    pub preview: usize,
}
