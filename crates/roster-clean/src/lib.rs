//! Cleaning stages for merged roster data.
//!
//! [`clean`] runs the ten cleaning steps in their fixed order and
//! [`drop_duplicates`] keeps the first row per student, term and track.
//! Invalid values never raise: they become missing and are either imputed
//! from their track or cause the row to be dropped.

pub mod dedupe;
pub mod pipeline;
pub mod schema;

pub use dedupe::drop_duplicates;
pub use pipeline::clean;
pub use schema::{MISSING_VALUES, decode_bool, is_missing_token, is_valid, normalize, title_case};

use roster_model::{Dataset, RawDataset};

/// Clean a merged dataset and drop duplicate identities.
pub fn clean_and_dedupe(raw: RawDataset) -> Dataset {
    drop_duplicates(clean(raw))
}
