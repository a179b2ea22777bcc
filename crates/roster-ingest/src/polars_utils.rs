//! Polars AnyValue conversion for sheet cells.

use polars::prelude::AnyValue;

/// Converts an AnyValue to a raw cell: `None` for Null, the text otherwise.
///
/// Sheets are read with every column as a string, so only the string arms
/// are hit in practice. Empty strings are kept as-is; the cleaning pipeline
/// decides what counts as missing.
pub(crate) fn any_to_cell(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_becomes_absent_cell() {
        assert_eq!(any_to_cell(AnyValue::Null), None);
        assert_eq!(any_to_cell(AnyValue::String("")), Some(String::new()));
        assert_eq!(any_to_cell(AnyValue::String("NA")), Some("NA".to_string()));
    }

    #[test]
    fn text_cells_keep_their_exact_spelling() {
        assert_eq!(any_to_cell(AnyValue::String("85.0")), Some("85.0".to_string()));
        assert_eq!(any_to_cell(AnyValue::String(" 0042 ")), Some(" 0042 ".to_string()));
    }
}
