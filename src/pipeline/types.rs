//! Output rows produced by the pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{StopId, TractId};

/// Equity metrics for a single stop, one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopMetrics {
    pub stop_id: StopId,
    pub departures: usize,
    /// Area-weighted proportion attribute around the stop.
    pub proportion: f64,
    /// Apportioned count attribute around the stop.
    pub count: f64,
    pub impact: f64,
    pub doors_opening: f64,
    pub doors_closing: f64,
    pub impact_class: i8,
}

/// Change in service attributed to a tract, one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractMetrics {
    pub tract_id: TractId,
    pub impact: f64,
    pub doors_opening: f64,
    pub doors_closing: f64,
}

/// Demographics of the area served by the whole network.
#[derive(Debug, Serialize)]
pub struct CatchmentSummary {
    pub generated_at: DateTime<Utc>,
    pub stops: usize,
    pub catchment_area: f64,
    pub proportion_attribute: String,
    pub proportion: f64,
    pub count_attribute: String,
    pub count: f64,
}

/// Exterior ring coordinates of a tract, ready for plotting.
#[derive(Debug, Serialize)]
pub struct TractOutline {
    pub tract_id: TractId,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}
