//! Per-field normalization and validity rules.
//!
//! `normalize` maps raw cell text to the field's canonical text form (or
//! missing) and `is_valid` checks a canonical value against the field's
//! domain. The cleaning pipeline applies the same primitives step by step.

use std::sync::LazyLock;

use regex::Regex;
use roster_model::{Field, FieldKind, StudentId, Term, format_flag, format_score};

/// Raw cell values treated as missing. Matching is exact and case-sensitive.
pub const MISSING_VALUES: [&str; 10] = [
    "", " ", "NA", "N/A", "n/a", "NaN", "-", "Waived", "None", "null",
];

static CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}[A-Za-z]$").expect("Invalid class regex"));

static COHORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}$").expect("Invalid cohort regex"));

static STUDENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("Invalid student id regex"));

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

pub fn is_missing_token(raw: &str) -> bool {
    MISSING_VALUES.contains(&raw)
}

/// Upper-case the first cased letter of every word, lower-case the rest.
///
/// A word starts at any character that does not follow a cased letter, so
/// `"o'neil"` becomes `"O'Neil"` and `"10a"` becomes `"10A"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;
    for ch in value.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        previous_cased = cased;
    }
    out
}

/// Trim and title-case a text cell. Blank text is missing.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(title_case(trimmed))
    }
}

/// Decode a boolean cell (case-insensitive, trimmed).
pub fn decode_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_uppercase().as_str() {
        "TRUE" | "Y" | "YES" | "1" | "1.0" => Some(true),
        "FALSE" | "N" | "NO" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Parse a finite number; anything else is missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse an integral number (`"2.0"` is 2, `"2.5"` is missing).
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = parse_number(raw)?;
    if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Accept an integer as a student number when its decimal form is exactly four digits.
pub fn student_id(value: i64) -> Option<StudentId> {
    if !STUDENT_ID_REGEX.is_match(&value.to_string()) {
        return None;
    }
    u16::try_from(value).ok().map(StudentId::new)
}

pub fn term(value: i64) -> Option<Term> {
    match value {
        1 | 2 => Some(Term::new(value as u8)),
        _ => None,
    }
}

/// Keep a score only inside `[0, 100]`.
pub fn score(value: f64) -> Option<f64> {
    (SCORE_MIN..=SCORE_MAX).contains(&value).then_some(value)
}

pub fn is_valid_class(value: &str) -> bool {
    CLASS_REGEX.is_match(value)
}

pub fn is_valid_cohort(value: &str) -> bool {
    COHORT_REGEX.is_match(value)
}

/// Normalize one raw cell for `field`, returning `None` for missing.
///
/// This applies missing-token detection and the field's coercion but not
/// its domain check; see [`is_valid`].
pub fn normalize(field: Field, raw: &str) -> Option<String> {
    if is_missing_token(raw) {
        return None;
    }
    match field.kind() {
        FieldKind::Text => normalize_text(raw),
        FieldKind::Identifier => parse_integer(raw).map(|value| value.to_string()),
        FieldKind::Score => parse_number(raw).map(format_score),
        FieldKind::Flag => decode_bool(raw).map(format_flag),
    }
}

/// Check a normalized value against the field's domain.
pub fn is_valid(field: Field, value: &str) -> bool {
    match field {
        Field::Class => is_valid_class(value),
        Field::Cohort => is_valid_cohort(value),
        Field::FirstName | Field::LastName | Field::Track => !value.trim().is_empty(),
        Field::StudentId => parse_integer(value).and_then(student_id).is_some(),
        Field::Term => parse_integer(value).and_then(term).is_some(),
        Field::IncomeStudent | Field::Passed => decode_bool(value).is_some(),
        Field::Math
        | Field::English
        | Field::Science
        | Field::History
        | Field::Attendance
        | Field::ProjectScore => parse_number(value).and_then(score).is_some(),
    }
}
