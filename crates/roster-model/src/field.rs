//! The fixed roster schema: every column a student sheet may carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Broad value category of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Integer identity (`StudentID`, `Term`).
    Identifier,
    /// Normalized free or formatted text.
    Text,
    /// Numeric score in `[0, 100]`.
    Score,
    /// Boolean flag.
    Flag,
}

/// A column of the roster schema.
///
/// Declaration order is the canonical column order of the cleaned dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Field {
    StudentId,
    FirstName,
    LastName,
    Class,
    Cohort,
    Term,
    IncomeStudent,
    Math,
    English,
    Science,
    History,
    Attendance,
    ProjectScore,
    Passed,
    Track,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::StudentId,
        Field::FirstName,
        Field::LastName,
        Field::Class,
        Field::Cohort,
        Field::Term,
        Field::IncomeStudent,
        Field::Math,
        Field::English,
        Field::Science,
        Field::History,
        Field::Attendance,
        Field::ProjectScore,
        Field::Passed,
        Field::Track,
    ];

    /// Fields trimmed and title-cased during cleaning.
    pub const TEXT: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Class,
        Field::Cohort,
        Field::Track,
    ];

    /// All numeric `[0, 100]` fields, in imputation order.
    pub const SCORES: [Field; 6] = [
        Field::Math,
        Field::English,
        Field::Science,
        Field::History,
        Field::Attendance,
        Field::ProjectScore,
    ];

    /// The four subject scores reported together.
    pub const SUBJECTS: [Field; 4] = [Field::Math, Field::English, Field::Science, Field::History];

    pub const FLAGS: [Field; 2] = [Field::IncomeStudent, Field::Passed];

    /// Columns a workbook must provide for the pipeline to run at all.
    pub const REQUIRED: [Field; 2] = [Field::StudentId, Field::Term];

    /// Exact column header used in sheets and exports.
    pub fn header(self) -> &'static str {
        match self {
            Field::StudentId => "StudentID",
            Field::FirstName => "FirstName",
            Field::LastName => "LastName",
            Field::Class => "Class",
            Field::Cohort => "Cohort",
            Field::Term => "Term",
            Field::IncomeStudent => "IncomeStudent",
            Field::Math => "Math",
            Field::English => "English",
            Field::Science => "Science",
            Field::History => "History",
            Field::Attendance => "Attendance (%)",
            Field::ProjectScore => "ProjectScore",
            Field::Passed => "Passed (Y/N)",
            Field::Track => "Track",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::StudentId | Field::Term => FieldKind::Identifier,
            Field::FirstName | Field::LastName | Field::Class | Field::Cohort | Field::Track => {
                FieldKind::Text
            }
            Field::Math
            | Field::English
            | Field::Science
            | Field::History
            | Field::Attendance
            | Field::ProjectScore => FieldKind::Score,
            Field::IncomeStudent | Field::Passed => FieldKind::Flag,
        }
    }

    /// Short description of the accepted domain.
    pub fn description(self) -> &'static str {
        match self {
            Field::StudentId => "4-digit student number",
            Field::FirstName => "Given name (title-cased)",
            Field::LastName => "Family name (title-cased)",
            Field::Class => "Two digits and a letter, e.g. 10A",
            Field::Cohort => "Enrollment years, e.g. 23-24",
            Field::Term => "Term number, 1 or 2",
            Field::IncomeStudent => "Income student flag (Y/N)",
            Field::Math => "Math score, 0-100",
            Field::English => "English score, 0-100",
            Field::Science => "Science score, 0-100",
            Field::History => "History score, 0-100",
            Field::Attendance => "Attendance rate in percent, 0-100",
            Field::ProjectScore => "Project score, 0-100",
            Field::Passed => "Passed flag (Y/N)",
            Field::Track => "Academic track, taken from the sheet name",
        }
    }

    /// Resolve a sheet header to a field.
    ///
    /// Surrounding whitespace, a byte-order mark and repeated inner
    /// whitespace are ignored; the header text itself must match exactly.
    pub fn from_header(raw: &str) -> Option<Field> {
        let normalized = normalize_header(raw);
        Field::ALL
            .into_iter()
            .find(|field| field.header() == normalized)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_header(s).ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
