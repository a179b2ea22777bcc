//! CSV sheet reading.

mod reader;

pub use reader::{read_sheet, sheet_from_frame};
