//! The ordered cleaning pipeline.
//!
//! Each step works over the whole dataset before the next one starts, so
//! per-track imputation always sees the fully filtered values of its step.

use std::collections::BTreeMap;

use roster_model::{Dataset, Field, RawDataset, RawRecord, StudentRecord, round1};
use tracing::{debug, info, info_span};

use crate::schema::{
    decode_bool, is_missing_token, is_valid_class, is_valid_cohort, normalize_text,
    parse_integer, parse_number, score, student_id, term,
};

/// A record in flight: raw cells not yet consumed plus typed values so far.
struct Staged {
    raw: RawRecord,
    record: StudentRecord,
    student_id: Option<i64>,
    term: Option<i64>,
}

impl Staged {
    fn new(raw: RawRecord) -> Self {
        Self {
            raw,
            record: StudentRecord::default(),
            student_id: None,
            term: None,
        }
    }

    fn track(&self) -> Option<&str> {
        self.record.track.as_deref()
    }
}

/// Run every cleaning step and return the surviving typed records.
///
/// Malformed values degrade to missing and are imputed where possible;
/// records that still carry a missing value in a present field are dropped.
/// Nothing here fails.
pub fn clean(raw: RawDataset) -> Dataset {
    let span = info_span!("clean", rows = raw.len());
    let _guard = span.enter();

    let RawDataset { fields, records } = raw;
    let input = records.len();
    let mut staged: Vec<Staged> = records.into_iter().map(Staged::new).collect();

    normalize_nulls(&mut staged);
    normalize_text_fields(&mut staged);
    validate_formats(&mut staged);
    coerce_identity(&mut staged);
    validate_identity(&mut staged);
    coerce_scores(&mut staged);
    impute_scores(&mut staged);
    decode_flags(&mut staged);
    impute_flags(&mut staged);

    let records: Vec<StudentRecord> = staged
        .into_iter()
        .map(|staged| staged.record)
        .filter(|record| fields.iter().all(|field| !record.is_missing(*field)))
        .collect();
    debug!(step = "completeness", dropped = input - records.len());

    info!(input, kept = records.len(), "cleaned dataset");
    Dataset::new(fields, records)
}

fn normalize_nulls(staged: &mut [Staged]) {
    let mut cleared = 0usize;
    for item in staged.iter_mut() {
        let missing: Vec<Field> = item
            .raw
            .iter()
            .filter(|(_, value)| is_missing_token(value))
            .map(|(field, _)| field)
            .collect();
        cleared += missing.len();
        for field in missing {
            item.raw.clear(field);
        }
    }
    debug!(step = "null_normalization", cleared);
}

fn normalize_text_fields(staged: &mut [Staged]) {
    let mut blanked = 0usize;
    for item in staged.iter_mut() {
        for field in Field::TEXT {
            let Some(value) = item.raw.take(field) else {
                continue;
            };
            let normalized = normalize_text(&value);
            if normalized.is_none() {
                blanked += 1;
            }
            if let Some(slot) = item.record.text_mut(field) {
                *slot = normalized;
            }
        }
    }
    debug!(step = "text_normalization", blanked);
}

fn validate_formats(staged: &mut [Staged]) {
    let mut rejected = 0usize;
    for item in staged.iter_mut() {
        let record = &mut item.record;
        if record.class.as_deref().is_some_and(|class| !is_valid_class(class)) {
            record.class = None;
            rejected += 1;
        }
        if record.cohort.as_deref().is_some_and(|cohort| !is_valid_cohort(cohort)) {
            record.cohort = None;
            rejected += 1;
        }
    }
    debug!(step = "format_validation", rejected);
}

fn coerce_identity(staged: &mut [Staged]) {
    let mut rejected = 0usize;
    for item in staged.iter_mut() {
        if let Some(value) = item.raw.take(Field::StudentId) {
            item.student_id = parse_integer(&value);
            rejected += usize::from(item.student_id.is_none());
        }
        if let Some(value) = item.raw.take(Field::Term) {
            item.term = parse_integer(&value);
            rejected += usize::from(item.term.is_none());
        }
    }
    debug!(step = "identity_coercion", rejected);
}

fn validate_identity(staged: &mut [Staged]) {
    let mut rejected = 0usize;
    for item in staged.iter_mut() {
        if let Some(value) = item.student_id {
            item.record.student_id = student_id(value);
            rejected += usize::from(item.record.student_id.is_none());
        }
        if let Some(value) = item.term {
            item.record.term = term(value);
            rejected += usize::from(item.record.term.is_none());
        }
    }
    debug!(step = "identity_validation", rejected);
}

fn coerce_scores(staged: &mut [Staged]) {
    let mut rejected = 0usize;
    for item in staged.iter_mut() {
        for field in Field::SCORES {
            let Some(value) = item.raw.take(field) else {
                continue;
            };
            let parsed = parse_number(&value).and_then(score);
            rejected += usize::from(parsed.is_none());
            if let Some(slot) = item.record.score_mut(field) {
                *slot = parsed;
            }
        }
    }
    debug!(step = "score_coercion", rejected);
}

/// Fill missing scores with the rounded mean of the same field in the same track.
fn impute_scores(staged: &mut [Staged]) {
    let mut imputed = 0usize;
    for field in Field::SCORES {
        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for item in staged.iter() {
            if let (Some(track), Some(value)) = (item.track(), item.record.score(field)) {
                let entry = totals.entry(track.to_string()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }
        let means: BTreeMap<String, f64> = totals
            .into_iter()
            .map(|(track, (sum, count))| (track, round1(sum / count as f64)))
            .collect();

        for item in staged.iter_mut() {
            let Some(mean) = item.track().and_then(|track| means.get(track)).copied() else {
                continue;
            };
            if let Some(slot) = item.record.score_mut(field)
                && slot.is_none()
            {
                *slot = Some(mean);
                imputed += 1;
            }
        }
    }
    debug!(step = "score_imputation", imputed);
}

fn decode_flags(staged: &mut [Staged]) {
    let mut rejected = 0usize;
    for item in staged.iter_mut() {
        for field in Field::FLAGS {
            let Some(value) = item.raw.take(field) else {
                continue;
            };
            let decoded = decode_bool(&value);
            rejected += usize::from(decoded.is_none());
            if let Some(slot) = item.record.flag_mut(field) {
                *slot = decoded;
            }
        }
    }
    debug!(step = "flag_decoding", rejected);
}

/// Most frequent value, ties going to whichever value was seen first.
#[derive(Debug, Default)]
struct ModeTally {
    counts: Vec<(bool, usize)>,
}

impl ModeTally {
    fn add(&mut self, value: bool) {
        match self.counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((value, 1)),
        }
    }

    fn mode(&self) -> Option<bool> {
        let mut best: Option<(bool, usize)> = None;
        for &(value, count) in &self.counts {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }
}

fn impute_flags(staged: &mut [Staged]) {
    let mut imputed = 0usize;
    for field in Field::FLAGS {
        let mut tallies: BTreeMap<String, ModeTally> = BTreeMap::new();
        for item in staged.iter() {
            if let (Some(track), Some(value)) = (item.track(), item.record.flag(field)) {
                tallies.entry(track.to_string()).or_default().add(value);
            }
        }

        for item in staged.iter_mut() {
            let Some(mode) = item
                .track()
                .and_then(|track| tallies.get(track))
                .and_then(ModeTally::mode)
            else {
                continue;
            };
            if let Some(slot) = item.record.flag_mut(field)
                && slot.is_none()
            {
                *slot = Some(mode);
                imputed += 1;
            }
        }
    }
    debug!(step = "flag_imputation", imputed);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use roster_model::{StudentId, Term};

    use super::*;

    fn dataset(fields: &[Field], rows: Vec<RawRecord>) -> RawDataset {
        let mut raw = RawDataset::new(fields.iter().copied().collect::<BTreeSet<_>>());
        for row in rows {
            raw.push_record(row);
        }
        raw
    }

    fn identity(id: &str, term: &str, track: &str) -> RawRecord {
        RawRecord::new()
            .with(Field::StudentId, id)
            .with(Field::Term, term)
            .with(Field::Track, track)
    }

    #[test]
    fn drops_rows_with_malformed_identity() {
        let raw = dataset(
            &[Field::StudentId, Field::Term, Field::Track],
            vec![
                identity("1001", "1", "Alpha"),
                identity("12A4", "1", "Alpha"),
                identity("1003", "2", "Alpha"),
                identity("2001", "1", "Beta"),
                identity("2002", "2", "Beta"),
            ],
        );
        let cleaned = clean(raw);
        let ids: Vec<u16> = cleaned
            .iter()
            .filter_map(|r| r.student_id.map(StudentId::value))
            .collect();
        assert_eq!(ids, vec![1001, 1003, 2001, 2002]);
    }

    #[test]
    fn imputes_attendance_with_track_mean() {
        let fields = [Field::StudentId, Field::Term, Field::Attendance, Field::Track];
        let raw = dataset(
            &fields,
            vec![
                identity("1001", "1", "Alpha").with(Field::Attendance, "80"),
                identity("1002", "1", "Alpha").with(Field::Attendance, "90"),
                identity("1003", "1", "Alpha").with(Field::Attendance, "NA"),
            ],
        );
        let cleaned = clean(raw);
        let attendance: Vec<f64> = cleaned.iter().filter_map(|r| r.attendance).collect();
        assert_eq!(attendance, vec![80.0, 90.0, 85.0]);
    }

    #[test]
    fn imputed_mean_is_rounded_to_one_decimal() {
        let fields = [Field::StudentId, Field::Term, Field::Math, Field::Track];
        let raw = dataset(
            &fields,
            vec![
                identity("1001", "1", "Alpha").with(Field::Math, "70"),
                identity("1002", "1", "Alpha").with(Field::Math, "71"),
                identity("1003", "1", "Alpha").with(Field::Math, "71"),
                identity("1004", "1", "Alpha").with(Field::Math, "150"),
            ],
        );
        let cleaned = clean(raw);
        assert_eq!(cleaned.records[3].math, Some(70.7));
    }

    #[test]
    fn imputed_mean_rounds_halves_to_even() {
        let fields = [Field::StudentId, Field::Term, Field::Math, Field::Track];
        let raw = dataset(
            &fields,
            vec![
                identity("1001", "1", "Alpha").with(Field::Math, "70.5"),
                identity("1002", "1", "Alpha").with(Field::Math, "70"),
                identity("1003", "1", "Alpha").with(Field::Math, "NA"),
            ],
        );
        let cleaned = clean(raw);
        assert_eq!(cleaned.records[2].math, Some(70.2));
    }

    #[test]
    fn decodes_and_imputes_passed_with_mode() {
        let fields = [Field::StudentId, Field::Term, Field::Passed, Field::Track];
        let raw = dataset(
            &fields,
            vec![
                identity("1001", "1", "Alpha").with(Field::Passed, "Y"),
                identity("1002", "1", "Alpha").with(Field::Passed, "N"),
                identity("1003", "1", "Alpha").with(Field::Passed, "FALSE"),
                identity("1004", "1", "Alpha").with(Field::Passed, "bogus"),
            ],
        );
        let cleaned = clean(raw);
        let passed: Vec<Option<bool>> = cleaned.iter().map(|r| r.passed).collect();
        assert_eq!(passed, vec![Some(true), Some(false), Some(false), Some(false)]);
    }

    #[test]
    fn mode_ties_go_to_first_seen_value() {
        let mut tally = ModeTally::default();
        tally.add(false);
        tally.add(true);
        assert_eq!(tally.mode(), Some(false));
        tally.add(true);
        assert_eq!(tally.mode(), Some(true));
        assert_eq!(ModeTally::default().mode(), None);
    }

    #[test]
    fn track_without_values_drops_its_missing_rows() {
        let fields = [Field::StudentId, Field::Term, Field::Science, Field::Track];
        let raw = dataset(
            &fields,
            vec![
                identity("1001", "1", "Alpha").with(Field::Science, "60"),
                identity("2001", "1", "Beta").with(Field::Science, "-"),
            ],
        );
        let cleaned = clean(raw);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.records[0].track.as_deref(), Some("Alpha"));
    }

    #[test]
    fn text_fields_are_normalized_and_validated() {
        let fields = [
            Field::StudentId,
            Field::Term,
            Field::FirstName,
            Field::Class,
            Field::Cohort,
            Field::Track,
        ];
        let raw = dataset(
            &fields,
            vec![
                identity("1001", "2.0", "data science")
                    .with(Field::FirstName, "  ada  ")
                    .with(Field::Class, "10a")
                    .with(Field::Cohort, "23-24"),
                identity("1002", "1", "data science")
                    .with(Field::FirstName, "grace")
                    .with(Field::Class, "Tenth")
                    .with(Field::Cohort, "23-24"),
            ],
        );
        let cleaned = clean(raw);
        assert_eq!(cleaned.len(), 1);
        let record = &cleaned.records[0];
        assert_eq!(record.first_name.as_deref(), Some("Ada"));
        assert_eq!(record.class.as_deref(), Some("10A"));
        assert_eq!(record.track.as_deref(), Some("Data Science"));
        assert_eq!(record.term, Some(Term::new(2)));
    }

    #[test]
    fn absent_fields_do_not_filter_records() {
        let raw = dataset(
            &[Field::StudentId, Field::Term, Field::Track],
            vec![identity("1001", "1", "Alpha")],
        );
        let cleaned = clean(raw);
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned.records[0].math.is_none());
        assert!(!cleaned.has_field(Field::Math));
    }
}
