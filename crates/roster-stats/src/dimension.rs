use std::fmt;

use roster_model::{StudentRecord, format_flag};
use serde::{Deserialize, Serialize};

/// Attribute used to partition records into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupDimension {
    Track,
    Cohort,
    Income,
}

impl GroupDimension {
    /// Report order.
    pub const ALL: [GroupDimension; 3] = [
        GroupDimension::Track,
        GroupDimension::Cohort,
        GroupDimension::Income,
    ];

    /// Table name prefix, e.g. `Track` in `Track - Counts`.
    pub fn prefix(self) -> &'static str {
        match self {
            GroupDimension::Track => "Track",
            GroupDimension::Cohort => "Cohort",
            GroupDimension::Income => "Income",
        }
    }

    /// Header of the key column in every table of this dimension.
    pub fn key_column(self) -> &'static str {
        match self {
            GroupDimension::Track => "Track",
            GroupDimension::Cohort => "Cohort",
            GroupDimension::Income => "IncomeStudent",
        }
    }

    /// Group key of a record, `None` when the attribute is missing.
    pub fn key_of(self, record: &StudentRecord) -> Option<String> {
        match self {
            GroupDimension::Track => record.track.clone(),
            GroupDimension::Cohort => record.cohort.clone(),
            GroupDimension::Income => record.income_student.map(format_flag),
        }
    }

    /// Value column of the pass-rate table. The income table spells it
    /// with a lower-case `rate`.
    pub fn pass_rate_column(self) -> &'static str {
        match self {
            GroupDimension::Track | GroupDimension::Cohort => "Pass Rate (%)",
            GroupDimension::Income => "Pass rate (%)",
        }
    }

    /// Only tracks report the attendance/project correlation.
    pub fn has_correlation(self) -> bool {
        matches!(self, GroupDimension::Track)
    }
}

impl fmt::Display for GroupDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
