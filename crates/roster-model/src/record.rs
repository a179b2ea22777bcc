use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Field;

/// One merged input row before cleaning: field → raw cell text.
///
/// An absent entry is an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    cells: BTreeMap<Field, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.cells.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.cells.insert(field, value.into());
    }

    /// Mark a cell as missing.
    pub fn clear(&mut self, field: Field) {
        self.cells.remove(&field);
    }

    pub fn take(&mut self, field: Field) -> Option<String> {
        self.cells.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.cells.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A validated 4-digit student number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StudentId(u16);

impl StudentId {
    pub fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Academic term number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Term(u8);

impl Term {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed student row. `None` marks a missing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: Option<StudentId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub class: Option<String>,
    pub cohort: Option<String>,
    pub term: Option<Term>,
    pub income_student: Option<bool>,
    pub math: Option<f64>,
    pub english: Option<f64>,
    pub science: Option<f64>,
    pub history: Option<f64>,
    pub attendance: Option<f64>,
    pub project_score: Option<f64>,
    pub passed: Option<bool>,
    pub track: Option<String>,
}

impl StudentRecord {
    /// Score value for a score field; `None` for missing values and non-score fields.
    pub fn score(&self, field: Field) -> Option<f64> {
        match field {
            Field::Math => self.math,
            Field::English => self.english,
            Field::Science => self.science,
            Field::History => self.history,
            Field::Attendance => self.attendance,
            Field::ProjectScore => self.project_score,
            _ => None,
        }
    }

    /// Mutable slot for a score field, `None` when `field` is not a score.
    pub fn score_mut(&mut self, field: Field) -> Option<&mut Option<f64>> {
        match field {
            Field::Math => Some(&mut self.math),
            Field::English => Some(&mut self.english),
            Field::Science => Some(&mut self.science),
            Field::History => Some(&mut self.history),
            Field::Attendance => Some(&mut self.attendance),
            Field::ProjectScore => Some(&mut self.project_score),
            _ => None,
        }
    }

    pub fn flag(&self, field: Field) -> Option<bool> {
        match field {
            Field::IncomeStudent => self.income_student,
            Field::Passed => self.passed,
            _ => None,
        }
    }

    pub fn flag_mut(&mut self, field: Field) -> Option<&mut Option<bool>> {
        match field {
            Field::IncomeStudent => Some(&mut self.income_student),
            Field::Passed => Some(&mut self.passed),
            _ => None,
        }
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Class => self.class.as_deref(),
            Field::Cohort => self.cohort.as_deref(),
            Field::Track => self.track.as_deref(),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::Class => Some(&mut self.class),
            Field::Cohort => Some(&mut self.cohort),
            Field::Track => Some(&mut self.track),
            _ => None,
        }
    }

    pub fn is_missing(&self, field: Field) -> bool {
        match field {
            Field::StudentId => self.student_id.is_none(),
            Field::Term => self.term.is_none(),
            Field::IncomeStudent | Field::Passed => self.flag(field).is_none(),
            Field::FirstName | Field::LastName | Field::Class | Field::Cohort | Field::Track => {
                self.text(field).is_none()
            }
            _ => self.score(field).is_none(),
        }
    }

    /// Export rendering of one cell, `None` when missing.
    pub fn display_value(&self, field: Field) -> Option<String> {
        match field {
            Field::StudentId => self.student_id.map(|id| id.to_string()),
            Field::Term => self.term.map(|term| term.to_string()),
            Field::IncomeStudent | Field::Passed => self.flag(field).map(format_flag),
            Field::FirstName | Field::LastName | Field::Class | Field::Cohort | Field::Track => {
                self.text(field).map(str::to_string)
            }
            _ => self.score(field).map(format_score),
        }
    }
}

/// Render a score the shortest way that round-trips, keeping a decimal point (`85.0`).
pub fn format_score(value: f64) -> String {
    format!("{value:?}")
}

pub fn format_flag(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}
