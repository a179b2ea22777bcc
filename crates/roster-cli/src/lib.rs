//! CLI library components for the roster pipeline.

pub mod logging;
pub mod pipeline;
