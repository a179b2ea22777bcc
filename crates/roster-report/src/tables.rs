use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roster_model::{SummaryBook, SummaryTable};
use tracing::debug;

/// File name for a table: lower-case words joined by underscores.
///
/// `Track - Corr (%)` becomes `track_corr.csv`.
pub fn table_file_name(table_name: &str) -> String {
    let mut slug = String::with_capacity(table_name.len());
    for ch in table_name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    format!("{slug}.csv")
}

pub fn write_table_csv<W: Write>(table: &SummaryTable, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.headers())
        .with_context(|| format!("write header of {}", table.name))?;
    for row in &table.rows {
        csv.write_record(
            std::iter::once(row.key.clone()).chain(row.values.iter().map(|value| value.render())),
        )
        .with_context(|| format!("write row {} of {}", row.key, table.name))?;
    }
    csv.flush().context("flush summary table")?;
    Ok(())
}

/// Write one CSV per table into `dir`, returning the written paths in book order.
pub fn export_summary_tables(book: &SummaryBook, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut outputs = Vec::with_capacity(book.len());
    for table in book {
        let path = dir.join(table_file_name(&table.name));
        let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        write_table_csv(table, file)?;
        debug!(table = %table.name, path = %path.display(), "exported summary table");
        outputs.push(path);
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use roster_model::StatValue;

    use super::*;

    #[test]
    fn table_names_become_slugs() {
        assert_eq!(table_file_name("Track - Corr (%)"), "track_corr.csv");
        assert_eq!(table_file_name("Cohort - Avg Scores"), "cohort_avg_scores.csv");
        assert_eq!(table_file_name("Income - Pass Rate"), "income_pass_rate.csv");
    }

    #[test]
    fn missing_cells_are_empty() {
        let mut table = SummaryTable::new(
            "Track - Corr (%)",
            "Track",
            vec!["Correlation (%)".to_string()],
        );
        table.push_row("Alpha", vec![StatValue::Value(-37.96)]);
        table.push_row("Beta", vec![StatValue::Missing]);
        let mut out = Vec::new();
        write_table_csv(&table, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        insta::assert_snapshot!(text.trim_end(), @r"
        Track,Correlation (%)
        Alpha,-38.0
        Beta,
        ");
    }
}
