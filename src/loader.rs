//! Reading stops, departures and census tracts from disk.

use std::fs::File;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use geo::Point;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{CensusTract, DepartureRecord, Stop, StopId};

/// A row of the stops CSV: `stop_id,x,y,impact`.
#[derive(Debug, Deserialize)]
struct StopRow {
    stop_id: StopId,
    x: f64,
    y: f64,
    impact: f64,
}

fn read_csv<T: DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open '{path}'"))?;
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let record: T =
            result.with_context(|| format!("bad record {} in '{path}'", line + 1))?;
        rows.push(record);
    }

    Ok(rows)
}

/// Loads stops and builds a buffer of `radius` around each one.
///
/// Rows with a non-finite coordinate or impact are rejected.
pub fn load_stops(path: &str, radius: f64, segments: usize) -> Result<Vec<Stop>> {
    let rows: Vec<StopRow> = read_csv(path)?;

    let mut stops = Vec::with_capacity(rows.len());
    for (line, row) in rows.into_iter().enumerate() {
        if !(row.x.is_finite() && row.y.is_finite() && row.impact.is_finite()) {
            bail!(
                "bad record {} in '{path}': stop {} has a non-finite coordinate or impact",
                line + 1,
                row.stop_id
            );
        }
        let stop = Stop::new(
            row.stop_id,
            Point::new(row.x, row.y),
            row.impact,
            radius,
            segments,
        )?;
        stops.push(stop);
    }

    debug!(path, count = stops.len(), "Loaded stops");
    Ok(stops)
}

/// Loads GTFS `stop_times`-style departures. Columns other than
/// `stop_id` and `departure_time` are ignored.
pub fn load_departures(path: &str) -> Result<Vec<DepartureRecord>> {
    let departures: Vec<DepartureRecord> = read_csv(path)?;
    debug!(path, count = departures.len(), "Loaded departures");
    Ok(departures)
}

/// Loads census tracts from a JSON array.
pub fn load_tracts(path: &str) -> Result<Vec<CensusTract>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))?;
    let tracts: Vec<CensusTract> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse tracts in '{path}'"))?;

    debug!(path, count = tracts.len(), "Loaded census tracts");
    Ok(tracts)
}
