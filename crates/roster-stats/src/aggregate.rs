use roster_model::{Dataset, Field, StatValue, StudentRecord, SummaryBook, SummaryTable, round1};
use tracing::{debug, info_span};

use crate::GroupDimension;

pub const COUNT_COLUMN: &str = "Nb Students";
pub const CORRELATION_COLUMN: &str = "Correlation (%)";

/// Table name for a dimension and statistic, e.g. `Cohort - Avg Scores`.
pub fn table_name(dimension: GroupDimension, statistic: &str) -> String {
    format!("{} - {statistic}", dimension.prefix())
}

/// Records of one dataset partitioned along one dimension.
///
/// Groups keep first-appearance order; records without a key are left out.
#[derive(Debug)]
pub struct Aggregation<'a> {
    dimension: GroupDimension,
    groups: Vec<(String, Vec<&'a StudentRecord>)>,
}

impl<'a> Aggregation<'a> {
    pub fn new(dataset: &'a Dataset, dimension: GroupDimension) -> Self {
        let mut groups: Vec<(String, Vec<&'a StudentRecord>)> = Vec::new();
        for record in dataset {
            let Some(key) = dimension.key_of(record) else {
                continue;
            };
            match groups.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, members)) => members.push(record),
                None => groups.push((key, vec![record])),
            }
        }
        Self { dimension, groups }
    }

    pub fn dimension(&self) -> GroupDimension {
        self.dimension
    }

    pub fn group_keys(&self) -> Vec<&str> {
        self.groups.iter().map(|(key, _)| key.as_str()).collect()
    }

    fn table(&self, statistic: &str, columns: &[&str]) -> SummaryTable {
        SummaryTable::new(
            table_name(self.dimension, statistic),
            self.dimension.key_column(),
            columns.iter().map(|column| (*column).to_string()).collect(),
        )
    }

    fn mean_table(&self, statistic: &str, fields: &[Field]) -> SummaryTable {
        let headers: Vec<&str> = fields.iter().map(|field| field.header()).collect();
        let mut table = self.table(statistic, &headers);
        for (key, members) in &self.groups {
            let values = fields
                .iter()
                .map(|field| StatValue::from_option(mean(members.iter().map(|r| r.score(*field)))))
                .collect();
            table.push_row(key.clone(), values);
        }
        table
    }

    pub fn counts(&self) -> SummaryTable {
        let mut table = self.table("Counts", &[COUNT_COLUMN]);
        for (key, members) in &self.groups {
            table.push_row(key.clone(), vec![StatValue::Count(members.len())]);
        }
        table
    }

    pub fn avg_scores(&self) -> SummaryTable {
        self.mean_table("Avg Scores", &Field::SUBJECTS)
    }

    pub fn attendance(&self) -> SummaryTable {
        self.mean_table("Attendance", &[Field::Attendance])
    }

    pub fn project(&self) -> SummaryTable {
        self.mean_table("Project", &[Field::ProjectScore])
    }

    /// Share of passed records per group, in percent.
    pub fn pass_rate(&self) -> SummaryTable {
        let mut table = self.table("Pass Rate", &[self.dimension.pass_rate_column()]);
        for (key, members) in &self.groups {
            let rate = pass_rate(members.iter().copied());
            table.push_row(key.clone(), vec![StatValue::from_option(rate)]);
        }
        table
    }

    /// Pearson correlation of attendance and project score per group, in percent.
    pub fn correlation(&self) -> SummaryTable {
        let mut table = self.table("Corr (%)", &[CORRELATION_COLUMN]);
        for (key, members) in &self.groups {
            let pairs: Vec<(f64, f64)> = members
                .iter()
                .filter_map(|r| Some((r.attendance?, r.project_score?)))
                .collect();
            let value = pearson(&pairs).map(|r| round1(r * 100.0));
            table.push_row(key.clone(), vec![StatValue::from_option(value)]);
        }
        table
    }

    /// Every table of this dimension in report order.
    pub fn tables(&self) -> Vec<SummaryTable> {
        let mut tables = vec![
            self.counts(),
            self.avg_scores(),
            self.attendance(),
            self.project(),
            self.pass_rate(),
        ];
        if self.dimension.has_correlation() {
            tables.push(self.correlation());
        }
        tables
    }
}

/// Compute every summary table: track, then cohort, then income.
pub fn compute_all_stats(dataset: &Dataset) -> SummaryBook {
    let span = info_span!("aggregate", rows = dataset.len());
    let _guard = span.enter();

    let mut book = SummaryBook::default();
    for dimension in GroupDimension::ALL {
        let aggregation = Aggregation::new(dataset, dimension);
        debug!(%dimension, groups = aggregation.groups.len(), "grouped records");
        book.extend(aggregation.tables());
    }
    book
}

/// Rounded mean of the present values.
pub(crate) fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| round1(sum / count as f64))
}

pub(crate) fn pass_rate<'r>(records: impl Iterator<Item = &'r StudentRecord>) -> Option<f64> {
    mean(records.map(|r| r.passed.map(|passed| if passed { 100.0 } else { 0.0 })))
}

/// Pearson correlation with single-pass (Welford) co-moments.
///
/// A constant column keeps its running deviation at exactly zero and yields
/// `None`.
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let (mut mean_x, mut mean_y) = (0.0, 0.0);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (seen, (x, y)) in pairs.iter().enumerate() {
        let n = (seen + 1) as f64;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        let rx = x - mean_x;
        let ry = y - mean_y;
        sxx += dx * rx;
        syy += dy * ry;
        sxy += dx * ry;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some(sxy / (sxx.sqrt() * syy.sqrt()))
}
