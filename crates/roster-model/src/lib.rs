pub mod dataset;
pub mod error;
pub mod field;
pub mod record;
pub mod summary;

pub use dataset::{Dataset, RawDataset};
pub use error::{ModelError, Result};
pub use field::{Field, FieldKind};
pub use record::{RawRecord, StudentId, StudentRecord, Term, format_flag, format_score};
pub use summary::{StatValue, SummaryBook, SummaryRow, SummaryTable, round1};
