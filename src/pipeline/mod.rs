//! Row-wise driver over the stop and tract collections.
//!
//! Each function maps the metric functions over its input in order and
//! returns one output row per input entity, ready for [`crate::output`].

pub mod catchment;
pub mod stops;
pub mod tracts;
pub mod types;

pub use catchment::catchment_summary;
pub use stops::stop_metrics;
pub use tracts::{tract_metrics, tract_outlines};
