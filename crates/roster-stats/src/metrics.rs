use std::collections::BTreeSet;

use roster_model::{Dataset, StatValue};
use serde::Serialize;

use crate::aggregate::pass_rate;

/// Headline numbers for a cleaned roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_students: usize,
    pub tracks: usize,
    pub cohorts: usize,
    /// Percent of passed records, missing for an empty dataset.
    pub pass_rate: StatValue,
}

pub fn key_metrics(dataset: &Dataset) -> KeyMetrics {
    let tracks: BTreeSet<&str> = dataset.iter().filter_map(|r| r.track.as_deref()).collect();
    let cohorts: BTreeSet<&str> = dataset.iter().filter_map(|r| r.cohort.as_deref()).collect();
    KeyMetrics {
        total_students: dataset.len(),
        tracks: tracks.len(),
        cohorts: cohorts.len(),
        pass_rate: StatValue::from_option(pass_rate(dataset.iter())),
    }
}

#[cfg(test)]
mod tests {
    use roster_model::StudentRecord;

    use super::*;

    fn student(track: &str, cohort: Option<&str>, passed: bool) -> StudentRecord {
        StudentRecord {
            track: Some(track.into()),
            cohort: cohort.map(Into::into),
            passed: Some(passed),
            ..StudentRecord::default()
        }
    }

    #[test]
    fn counts_distinct_groups_and_pass_rate() {
        let dataset = Dataset::new(
            Default::default(),
            vec![
                student("Alpha", Some("23-24"), true),
                student("Alpha", Some("24-25"), false),
                student("Beta", Some("23-24"), true),
            ],
        );
        let metrics = key_metrics(&dataset);
        assert_eq!(metrics.total_students, 3);
        assert_eq!(metrics.tracks, 2);
        assert_eq!(metrics.cohorts, 2);
        assert_eq!(metrics.pass_rate, StatValue::Value(66.7));
    }

    #[test]
    fn empty_dataset_has_missing_pass_rate() {
        let metrics = key_metrics(&Dataset::default());
        assert_eq!(metrics.total_students, 0);
        assert!(metrics.pass_rate.is_missing());
    }
}
