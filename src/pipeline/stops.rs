use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::apportion::{count_demographic, proportional_demographic};
use crate::config::AnalysisConfig;
use crate::departures::{count_departures, peak_departures};
use crate::impact::{classify_impact, doors_closing, doors_opening};
use crate::model::{CensusTract, DepartureRecord, Stop};
use crate::pipeline::types::StopMetrics;

/// Computes one [`StopMetrics`] row per stop, in input order.
///
/// With `peak_only` set, departures outside the peak window are dropped
/// before counting; a malformed departure time fails the run.
#[tracing::instrument(
    skip_all,
    fields(stops = stops.len(), departures = departures.len(), tracts = tracts.len())
)]
pub fn stop_metrics(
    stops: &[Stop],
    departures: &[DepartureRecord],
    tracts: &[CensusTract],
    config: &AnalysisConfig,
) -> Result<Vec<StopMetrics>> {
    let counted: Vec<DepartureRecord> = if config.peak_only {
        peak_departures(departures, &config.peak_hours)?
            .into_iter()
            .cloned()
            .collect()
    } else {
        departures.to_vec()
    };
    debug!(kept = counted.len(), peak_only = config.peak_only, "Departures selected");

    let mut rows = Vec::with_capacity(stops.len());
    for stop in stops {
        let proportion =
            proportional_demographic(&stop.buffer, tracts, &config.proportion_attribute)
                .with_context(|| format!("apportioning proportion for stop {}", stop.id))?;
        let count = count_demographic(&stop.buffer, tracts, &config.count_attribute)
            .with_context(|| format!("apportioning count for stop {}", stop.id))?;

        rows.push(StopMetrics {
            stop_id: stop.id,
            departures: count_departures(stop.id, &counted),
            proportion,
            count,
            impact: stop.impact,
            doors_opening: doors_opening(stop.impact),
            doors_closing: doors_closing(stop.impact),
            impact_class: classify_impact(stop.impact, config.impact_threshold).as_i8(),
        });
    }

    let significant = rows.iter().filter(|r| r.impact_class != 0).count();
    info!(rows = rows.len(), significant, "Stop metrics computed");
    Ok(rows)
}
