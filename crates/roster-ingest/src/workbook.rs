/// One sheet: a rectangular table of raw cells.
///
/// `None` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a sheet from header and cell text, mostly for fixtures.
    pub fn from_rows(name: impl Into<String>, headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut sheet = Self::new(name, headers.iter().map(|h| (*h).to_string()).collect());
        for row in rows {
            sheet.push_row(row.iter().map(|cell| Some((*cell).to_string())).collect());
        }
        sheet
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.push_sheet(sheet);
        self
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_header_width() {
        let mut sheet = Sheet::new("Alpha", vec!["StudentID".into(), "Term".into()]);
        sheet.push_row(vec![Some("1234".into())]);
        sheet.push_row(vec![Some("1".into()), Some("2".into()), Some("extra".into())]);
        assert_eq!(sheet.rows[0], vec![Some("1234".to_string()), None]);
        assert_eq!(sheet.rows[1].len(), 2);
    }

    #[test]
    fn workbook_keeps_sheet_order() {
        let workbook = Workbook::new()
            .with_sheet(Sheet::new("Beta", vec![]))
            .with_sheet(Sheet::new("Alpha", vec![]));
        assert_eq!(workbook.sheet_names(), vec!["Beta", "Alpha"]);
    }
}
