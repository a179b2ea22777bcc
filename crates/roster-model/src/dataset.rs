use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Field, RawRecord, StudentRecord};

/// Merged raw rows from every sheet, in workbook order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    /// Fields present in at least one sheet (always includes `Track`).
    pub fields: BTreeSet<Field>,
    pub records: Vec<RawRecord>,
}

impl RawDataset {
    pub fn new(fields: BTreeSet<Field>) -> Self {
        Self {
            fields,
            records: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Typed student rows flowing through cleaning, deduplication and aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Fields that were present in the input. Absent fields stay `None` on
    /// every record and are ignored by the completeness filter.
    pub fields: BTreeSet<Field>,
    pub records: Vec<StudentRecord>,
}

impl Dataset {
    pub fn new(fields: BTreeSet<Field>, records: Vec<StudentRecord>) -> Self {
        Self { fields, records }
    }

    /// Present fields in canonical export order.
    pub fn columns(&self) -> Vec<Field> {
        self.fields.iter().copied().collect()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
