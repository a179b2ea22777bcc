//! Aggregation over cleaned rosters.

use std::collections::BTreeSet;

use proptest::prelude::*;
use roster_clean::clean_and_dedupe;
use roster_model::{
    Dataset, Field, RawDataset, RawRecord, StatValue, StudentId, StudentRecord, Term,
};
use roster_stats::{Aggregation, GroupDimension, compute_all_stats, key_metrics};

fn raw(id: &str, term: &str, track: &str) -> RawRecord {
    RawRecord::new()
        .with(Field::StudentId, id)
        .with(Field::Term, term)
        .with(Field::Track, track)
}

fn student(id: u16, track: &str, cohort: &str, income: bool, passed: bool) -> StudentRecord {
    StudentRecord {
        student_id: Some(StudentId::new(id)),
        term: Some(Term::new(1)),
        track: Some(track.into()),
        cohort: Some(cohort.into()),
        income_student: Some(income),
        passed: Some(passed),
        math: Some(60.0),
        attendance: Some(80.0),
        project_score: Some(f64::from(id % 100)),
        ..StudentRecord::default()
    }
}

fn dataset(records: Vec<StudentRecord>) -> Dataset {
    Dataset::new(Field::ALL.into_iter().collect(), records)
}

#[test]
fn malformed_identity_is_excluded_from_counts() {
    let mut merged = RawDataset::new(BTreeSet::from([Field::StudentId, Field::Term, Field::Track]));
    for record in [
        raw("1001", "1", "Alpha"),
        raw("12A4", "1", "Alpha"),
        raw("1003", "1", "Alpha"),
        raw("2001", "1", "Beta"),
        raw("2002", "2", "Beta"),
    ] {
        merged.push_record(record);
    }
    let cleaned = clean_and_dedupe(merged);
    assert_eq!(cleaned.len(), 4);

    let book = compute_all_stats(&cleaned);
    let counts = book.require("Track - Counts").expect("track counts");
    assert_eq!(counts.keys(), vec!["Alpha", "Beta"]);
    assert_eq!(counts.value("Alpha", "Nb Students"), Some(StatValue::Count(2)));
    assert_eq!(counts.value("Beta", "Nb Students"), Some(StatValue::Count(2)));
}

#[test]
fn produces_every_table_in_report_order() {
    let book = compute_all_stats(&dataset(vec![student(1001, "Alpha", "23-24", true, true)]));
    assert_eq!(
        book.names(),
        vec![
            "Track - Counts",
            "Track - Avg Scores",
            "Track - Attendance",
            "Track - Project",
            "Track - Pass Rate",
            "Track - Corr (%)",
            "Cohort - Counts",
            "Cohort - Avg Scores",
            "Cohort - Attendance",
            "Cohort - Project",
            "Cohort - Pass Rate",
            "Income - Counts",
            "Income - Avg Scores",
            "Income - Attendance",
            "Income - Project",
            "Income - Pass Rate",
        ]
    );
    let scores = book.require("Track - Avg Scores").expect("scores");
    assert_eq!(
        scores.headers(),
        vec!["Track", "Math", "English", "Science", "History"]
    );
    assert_eq!(scores.value("Alpha", "Math"), Some(StatValue::Value(60.0)));
    assert_eq!(scores.value("Alpha", "English"), Some(StatValue::Missing));
    let income = book.require("Income - Counts").expect("income");
    assert_eq!(income.key_column, "IncomeStudent");
    assert_eq!(income.keys(), vec!["True"]);
}

#[test]
fn groups_follow_first_appearance() {
    let data = dataset(vec![
        student(1001, "Gamma", "24-25", false, true),
        student(1002, "Alpha", "23-24", true, true),
        student(1003, "Gamma", "23-24", false, false),
    ]);
    let cohorts = Aggregation::new(&data, GroupDimension::Cohort);
    assert_eq!(cohorts.group_keys(), vec!["24-25", "23-24"]);
    let income = Aggregation::new(&data, GroupDimension::Income);
    assert_eq!(income.group_keys(), vec!["False", "True"]);
}

#[test]
fn pass_rate_extremes_are_exact() {
    let data = dataset(vec![
        student(1001, "Alpha", "23-24", true, true),
        student(1002, "Alpha", "23-24", true, true),
        student(1003, "Beta", "23-24", true, false),
        student(1004, "Beta", "23-24", true, false),
    ]);
    let rates = Aggregation::new(&data, GroupDimension::Track).pass_rate();
    assert_eq!(rates.value("Alpha", "Pass Rate (%)"), Some(StatValue::Value(100.0)));
    assert_eq!(rates.value("Beta", "Pass Rate (%)"), Some(StatValue::Value(0.0)));
}

#[test]
fn constant_attendance_has_no_correlation() {
    let data = dataset(vec![
        student(1010, "Alpha", "23-24", true, true),
        student(1020, "Alpha", "23-24", true, true),
        student(1030, "Alpha", "23-24", true, true),
        student(2001, "Beta", "23-24", true, true),
    ]);
    let corr = Aggregation::new(&data, GroupDimension::Track).correlation();
    assert_eq!(corr.value("Alpha", "Correlation (%)"), Some(StatValue::Missing));
    assert_eq!(corr.value("Beta", "Correlation (%)"), Some(StatValue::Missing));
}

#[test]
fn constant_inexact_attendance_has_no_correlation() {
    let mut records = Vec::new();
    for (id, project) in [(1001, 1.0), (1002, 2.0), (1003, 4.0)] {
        let mut record = student(id, "Alpha", "23-24", true, true);
        record.attendance = Some(91.9);
        record.project_score = Some(project);
        records.push(record);
    }
    let corr = Aggregation::new(&dataset(records), GroupDimension::Track).correlation();
    assert_eq!(corr.value("Alpha", "Correlation (%)"), Some(StatValue::Missing));
}

#[test]
fn income_pass_rate_uses_its_own_column_name() {
    let data = dataset(vec![
        student(1001, "Alpha", "23-24", true, true),
        student(1002, "Alpha", "23-24", false, false),
    ]);
    let book = compute_all_stats(&data);
    let income = book.require("Income - Pass Rate").expect("income pass rate");
    assert_eq!(income.columns, vec!["Pass rate (%)".to_string()]);
    assert_eq!(income.value("True", "Pass rate (%)"), Some(StatValue::Value(100.0)));
    let cohort = book.require("Cohort - Pass Rate").expect("cohort pass rate");
    assert_eq!(cohort.value("23-24", "Pass Rate (%)"), Some(StatValue::Value(50.0)));
}

#[test]
fn correlation_is_scaled_to_percent() {
    let mut records = Vec::new();
    for (id, attendance, project) in [(1001, 70.0, 60.0), (1002, 80.0, 70.0), (1003, 90.0, 80.0)] {
        let mut record = student(id, "Alpha", "23-24", true, true);
        record.attendance = Some(attendance);
        record.project_score = Some(project);
        records.push(record);
    }
    let corr = Aggregation::new(&dataset(records), GroupDimension::Track).correlation();
    assert_eq!(corr.value("Alpha", "Correlation (%)"), Some(StatValue::Value(100.0)));
}

#[test]
fn key_metrics_serialize_flat() {
    let data = dataset(vec![
        student(1001, "Alpha", "23-24", true, true),
        student(1002, "Beta", "23-24", false, false),
    ]);
    let json = serde_json::to_string(&key_metrics(&data)).expect("serialize");
    assert_eq!(json, r#"{"total_students":2,"tracks":2,"cohorts":1,"pass_rate":50.0}"#);
}

fn arbitrary_student() -> impl Strategy<Value = StudentRecord> {
    (
        1000u16..10000,
        prop::sample::select(vec!["Alpha", "Beta", "Gamma"]),
        prop::sample::select(vec!["22-23", "23-24"]),
        any::<bool>(),
        any::<bool>(),
        0u8..=100,
    )
        .prop_map(|(id, track, cohort, income, passed, score)| {
            let mut record = student(id, track, cohort, income, passed);
            record.math = Some(f64::from(score));
            record
        })
}

proptest! {
    #[test]
    fn counts_sum_to_dataset_length(records in prop::collection::vec(arbitrary_student(), 0..30)) {
        let data = dataset(records);
        for dimension in GroupDimension::ALL {
            let counts = Aggregation::new(&data, dimension).counts();
            let total: usize = counts
                .rows
                .iter()
                .filter_map(|row| match row.values[0] {
                    StatValue::Count(count) => Some(count),
                    _ => None,
                })
                .sum();
            prop_assert_eq!(total, data.len());
        }
    }

    #[test]
    fn averages_stay_in_score_range(records in prop::collection::vec(arbitrary_student(), 1..30)) {
        let data = dataset(records);
        let scores = Aggregation::new(&data, GroupDimension::Track).avg_scores();
        for row in &scores.rows {
            if let Some(math) = row.values[0].as_f64() {
                prop_assert!((0.0..=100.0).contains(&math));
            }
        }
    }
}
