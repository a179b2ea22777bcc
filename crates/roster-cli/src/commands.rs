use anyhow::Result;
use comfy_table::Table;
use roster_cli::pipeline::{report_stage, run_pipeline};
use roster_model::Field;
use roster_report::ReportOptions;
use tracing::{info, info_span};

use crate::cli::ReportArgs;
use crate::summary::apply_table_style;
use crate::types::ReportResult;

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Kind", "Description"]);
    apply_table_style(&mut table);
    for field in Field::ALL {
        table.add_row(vec![
            field.header().to_string(),
            format!("{:?}", field.kind()).to_lowercase(),
            field.description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<ReportResult> {
    let workbook_dir = &args.workbook_dir;
    let span = info_span!("roster", dir = %workbook_dir.display());
    let _guard = span.enter();

    let output = run_pipeline(workbook_dir)?;

    let paths = if args.dry_run {
        info!("dry run, skipping outputs");
        None
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| workbook_dir.join("output"));
        Some(report_stage(&output, &ReportOptions::new(output_dir))?)
    };

    Ok(ReportResult {
        workbook_dir: workbook_dir.clone(),
        output,
        paths,
        preview: args.preview,
    })
}
