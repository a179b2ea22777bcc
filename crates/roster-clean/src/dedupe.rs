//! Identity-based deduplication.

use std::collections::BTreeSet;

use roster_model::{Dataset, StudentId, StudentRecord, Term};
use tracing::debug;

type IdentityKey = (Option<StudentId>, Option<Term>, Option<String>);

fn identity_key(record: &StudentRecord) -> IdentityKey {
    (record.student_id, record.term, record.track.clone())
}

/// Keep the first record for each (student, term, track), preserving order.
pub fn drop_duplicates(dataset: Dataset) -> Dataset {
    let Dataset { fields, records } = dataset;
    let before = records.len();

    let mut seen = BTreeSet::new();
    let records: Vec<StudentRecord> = records
        .into_iter()
        .filter(|record| seen.insert(identity_key(record)))
        .collect();

    debug!(dropped = before - records.len(), kept = records.len(), "deduplicated");
    Dataset::new(fields, records)
}
