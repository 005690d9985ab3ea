use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::apportion::{count_demographic, proportional_demographic};
use crate::config::AnalysisConfig;
use crate::geometry::{Region, catchment};
use crate::model::{CensusTract, Stop};
use crate::pipeline::types::CatchmentSummary;

/// Apportions demographics over the union of all stop buffers.
#[tracing::instrument(skip_all, fields(stops = stops.len(), tracts = tracts.len()))]
pub fn catchment_summary(
    stops: &[Stop],
    tracts: &[CensusTract],
    config: &AnalysisConfig,
) -> Result<CatchmentSummary> {
    let area = catchment(stops);

    let proportion = proportional_demographic(&area, tracts, &config.proportion_attribute)
        .context("apportioning catchment proportion")?;
    let count = count_demographic(&area, tracts, &config.count_attribute)
        .context("apportioning catchment count")?;

    let summary = CatchmentSummary {
        generated_at: Utc::now(),
        stops: stops.len(),
        catchment_area: area.area(),
        proportion_attribute: config.proportion_attribute.clone(),
        proportion,
        count_attribute: config.count_attribute.clone(),
        count,
    };

    info!(
        catchment_area = summary.catchment_area,
        proportion, count, "Catchment summary computed"
    );
    Ok(summary)
}
