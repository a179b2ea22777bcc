//! Grouped summary statistics over a cleaned roster.
//!
//! One [`Aggregation`] per [`GroupDimension`] produces the count, average
//! and pass-rate tables; [`compute_all_stats`] assembles every table in
//! report order and [`key_metrics`] condenses the dataset into headline
//! numbers.

pub mod aggregate;
pub mod dimension;
pub mod metrics;

pub use aggregate::{Aggregation, compute_all_stats, table_name};
pub use dimension::GroupDimension;
pub use metrics::{KeyMetrics, key_metrics};
