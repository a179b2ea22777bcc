use std::fs;

use roster_ingest::{IngestError, Sheet, Workbook, load_workbook, merge_sheets};
use roster_model::Field;
use tempfile::TempDir;

fn alpha() -> Sheet {
    Sheet::from_rows(
        "Alpha",
        &["StudentID", "Term", "Math", "Notes"],
        &[&["1001", "1", "80", "x"], &["1002", "2", "NA", "y"]],
    )
}

fn beta() -> Sheet {
    Sheet::from_rows(
        "Beta",
        &["Term", "StudentID", "Track"],
        &[&["1", "2001", "Gamma"]],
    )
}

#[test]
fn merges_sheets_in_workbook_order_with_track() {
    let workbook = Workbook::new().with_sheet(alpha()).with_sheet(beta());
    let raw = merge_sheets(workbook).expect("merge");

    assert_eq!(raw.len(), 3);
    let ids: Vec<_> = raw
        .records
        .iter()
        .map(|r| r.get(Field::StudentId).unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["1001", "1002", "2001"]);

    assert_eq!(raw.records[0].get(Field::Track), Some("Alpha"));
    // The sheet name always wins over a Track column.
    assert_eq!(raw.records[2].get(Field::Track), Some("Beta"));
    // Raw text is untouched: no validation at this stage.
    assert_eq!(raw.records[1].get(Field::Math), Some("NA"));
}

#[test]
fn field_set_is_union_of_known_columns() {
    let workbook = Workbook::new().with_sheet(alpha()).with_sheet(beta());
    let raw = merge_sheets(workbook).expect("merge");

    let fields: Vec<Field> = raw.fields.iter().copied().collect();
    assert_eq!(
        fields,
        vec![Field::StudentId, Field::Term, Field::Math, Field::Track]
    );
    assert_eq!(raw.records[2].get(Field::Math), None);
}

#[test]
fn empty_workbook_is_structural_error() {
    let result = merge_sheets(Workbook::new());
    assert!(matches!(result, Err(IngestError::NoSheets)));
}

#[test]
fn missing_identity_column_is_structural_error() {
    let sheet = Sheet::from_rows("Alpha", &["StudentID", "Math"], &[&["1001", "80"]]);
    let result = merge_sheets(Workbook::new().with_sheet(sheet));
    match result {
        Err(IngestError::MissingColumn { column }) => assert_eq!(column, "Term"),
        other => panic!("expected missing column error, got {other:?}"),
    }
}

#[test]
fn loads_workbook_directory() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("Beta.csv"),
        "StudentID,Term,Passed (Y/N)\n2001,1,Y\n",
    )
    .expect("write beta");
    fs::write(
        dir.path().join("Alpha.csv"),
        "StudentID,Term,Passed (Y/N)\n1001,2,N\n1002,1,\n",
    )
    .expect("write alpha");

    let raw = load_workbook(dir.path()).expect("load");
    let tracks: Vec<_> = raw
        .records
        .iter()
        .map(|r| r.get(Field::Track).unwrap_or_default())
        .collect();
    assert_eq!(tracks, vec!["Alpha", "Alpha", "Beta"]);
    assert_eq!(raw.records[1].get(Field::Passed), None);
    assert!(raw.has_field(Field::Passed));
}
