//! Named summary tables produced by aggregation.

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Round to one decimal place, halves to even.
///
/// Every imputed value and reported statistic goes through this.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// One cell of a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(usize),
    Value(f64),
    /// Undefined statistic (no values, or insufficient sample/variance).
    Missing,
}

impl StatValue {
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(StatValue::Missing, StatValue::Value)
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            StatValue::Count(count) => Some(count as f64),
            StatValue::Value(value) => Some(value),
            StatValue::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, StatValue::Missing)
    }

    /// Text rendering for exports: counts as integers, values with one
    /// decimal, missing as an empty string.
    pub fn render(self) -> String {
        match self {
            StatValue::Count(count) => count.to_string(),
            StatValue::Value(value) => format!("{value:.1}"),
            StatValue::Missing => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub key: String,
    pub values: Vec<StatValue>,
}

/// A table keyed by one grouping dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub name: String,
    pub key_column: String,
    pub columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new(name: impl Into<String>, key_column: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            key_column: key_column.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, key: impl Into<String>, values: Vec<StatValue>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push(SummaryRow {
            key: key.into(),
            values,
        });
    }

    /// Key column followed by the value columns.
    pub fn headers(&self) -> Vec<&str> {
        std::iter::once(self.key_column.as_str())
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    pub fn row(&self, key: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn value(&self, key: &str, column: &str) -> Option<StatValue> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.row(key).and_then(|row| row.values.get(index).copied())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Ordered set of summary tables with lookup by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryBook {
    tables: Vec<SummaryTable>,
}

impl SummaryBook {
    pub fn push(&mut self, table: SummaryTable) {
        self.tables.push(table);
    }

    pub fn get(&self, name: &str) -> Option<&SummaryTable> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn require(&self, name: &str) -> Result<&SummaryTable> {
        self.get(name)
            .ok_or_else(|| ModelError::UnknownTable(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|table| table.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryTable> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Extend<SummaryTable> for SummaryBook {
    fn extend<T: IntoIterator<Item = SummaryTable>>(&mut self, iter: T) {
        self.tables.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SummaryBook {
    type Item = &'a SummaryTable;
    type IntoIter = std::slice::Iter<'a, SummaryTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
