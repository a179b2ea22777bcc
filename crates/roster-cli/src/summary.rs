use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_model::{Dataset, StatValue, SummaryTable};
use roster_stats::KeyMetrics;

use crate::types::ReportResult;

pub fn print_summary(result: &ReportResult) {
    let output = &result.output;
    println!("Workbook: {}", result.workbook_dir.display());
    println!(
        "Rows: {} merged, {} kept, {} dropped",
        output.merged_rows,
        output.dataset.len(),
        output.dropped_rows()
    );
    match &result.paths {
        Some(paths) => {
            println!("Cleaned dataset: {}", paths.cleaned.display());
            println!("Summary report: {}", paths.report.display());
            println!("Summary tables: {} files", paths.tables.len());
        }
        None => println!("Dry run: no files written"),
    }

    println!();
    println!("{}", metrics_table(&output.metrics));

    for table in &output.book {
        println!();
        println!("{}:", table.name);
        println!("{}", summary_table(table));
    }

    if result.preview > 0 {
        println!();
        let total = output.dataset.len();
        println!("Preview ({} of {total} rows):", result.preview.min(total));
        println!("{}", preview_table(&output.dataset, result.preview));
    }
}

fn metrics_table(metrics: &KeyMetrics) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total students"),
        header_cell("Tracks"),
        header_cell("Cohorts"),
        header_cell("Overall pass rate"),
    ]);
    apply_summary_table_style(&mut table);
    let pass_rate = match metrics.pass_rate {
        StatValue::Missing => dim_cell("-"),
        value => Cell::new(format!("{} %", value.render())).add_attribute(Attribute::Bold),
    };
    table.add_row(vec![
        Cell::new(metrics.total_students).add_attribute(Attribute::Bold),
        Cell::new(metrics.tracks),
        Cell::new(metrics.cohorts),
        pass_rate,
    ]);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

fn summary_table(summary: &SummaryTable) -> Table {
    let mut table = Table::new();
    table.set_header(summary.headers().into_iter().map(header_cell).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in &summary.rows {
        let mut cells = vec![key_cell(&row.key)];
        cells.extend(row.values.iter().map(|value| value_cell(*value)));
        table.add_row(cells);
    }
    for index in 1..=summary.columns.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

pub fn preview_table(dataset: &Dataset, limit: usize) -> Table {
    let columns = dataset.columns();
    let mut table = Table::new();
    table.set_header(
        columns
            .iter()
            .map(|field| header_cell(field.header()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for record in dataset.iter().take(limit) {
        table.add_row(
            columns
                .iter()
                .map(|field| match record.display_value(*field) {
                    Some(value) => Cell::new(value),
                    None => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn key_cell(key: &str) -> Cell {
    Cell::new(key)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: StatValue) -> Cell {
    match value {
        StatValue::Missing => dim_cell("-"),
        value => Cell::new(value.render()),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
