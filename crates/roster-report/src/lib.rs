//! Report generation for cleaned rosters.
//!
//! Outputs are written under an explicit [`ReportOptions::output_dir`]:
//!
//! - **Cleaned dataset**: one CSV with the surviving records
//! - **Summary tables**: one CSV per aggregation table
//! - **Summary report**: pretty JSON with key metrics and every table

mod cleaned;
mod options;
mod summary_json;
mod tables;

pub use cleaned::{export_cleaned_data, write_cleaned_csv};
pub use options::{ReportOptions, ReportPaths, write_report};
pub use summary_json::{
    REPORT_SCHEMA, REPORT_SCHEMA_VERSION, export_summary_report, summary_report_json,
};
pub use tables::{export_summary_tables, table_file_name, write_table_csv};
