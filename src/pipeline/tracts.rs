use anyhow::Result;
use geo::Geometry;
use tracing::info;

use crate::apportion::tract_impact;
use crate::geometry::coords::{Axis, polygon_coordinates};
use crate::impact::ImpactFilter;
use crate::model::{CensusTract, Stop};
use crate::pipeline::types::{TractMetrics, TractOutline};

/// Redistributes stop impacts onto every tract.
///
/// `doors_closing` is reported as a magnitude, like its stop-level counterpart.
#[tracing::instrument(skip_all, fields(tracts = tracts.len(), stops = stops.len()))]
pub fn tract_metrics(tracts: &[CensusTract], stops: &[Stop]) -> Vec<TractMetrics> {
    let rows: Vec<TractMetrics> = tracts
        .iter()
        .map(|tract| TractMetrics {
            tract_id: tract.id.clone(),
            impact: tract_impact(&tract.geometry, stops, ImpactFilter::All),
            doors_opening: tract_impact(&tract.geometry, stops, ImpactFilter::Positive),
            doors_closing: tract_impact(&tract.geometry, stops, ImpactFilter::Negative).abs(),
        })
        .collect();

    let served = rows.iter().filter(|r| r.impact != 0.0).count();
    info!(rows = rows.len(), served, "Tract metrics computed");
    rows
}

/// Exterior outlines of every tract for plotting.
pub fn tract_outlines(tracts: &[CensusTract]) -> Result<Vec<TractOutline>> {
    tracts
        .iter()
        .map(|tract| -> Result<TractOutline> {
            let geom = Geometry::Polygon(tract.geometry.clone());
            Ok(TractOutline {
                tract_id: tract.id.clone(),
                xs: polygon_coordinates(&geom, Axis::X)?,
                ys: polygon_coordinates(&geom, Axis::Y)?,
            })
        })
        .collect()
}
