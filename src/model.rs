//! Entities the metric functions read: stops, census tracts and departures.

use std::collections::HashMap;

use geo::{Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::EquityError;
use crate::geometry::stop_buffer;

pub type StopId = i64;
pub type TractId = String;

/// A transit stop with its walkable catchment and change in service.
#[derive(Debug, Clone)]
pub struct Stop {
    pub id: StopId,
    pub location: Point<f64>,
    pub buffer: Polygon<f64>,
    /// Signed change in service after a network change; positive is a gain.
    pub impact: f64,
}

impl Stop {
    /// Builds a stop whose buffer is a `segments`-gon disk of `radius` around `location`.
    ///
    /// # Errors
    ///
    /// Returns [`EquityError::InvalidBuffer`] unless `radius > 0` and `segments >= 3`.
    pub fn new(
        id: StopId,
        location: Point<f64>,
        impact: f64,
        radius: f64,
        segments: usize,
    ) -> Result<Self, EquityError> {
        Ok(Self {
            id,
            location,
            buffer: stop_buffer(location, radius, segments)?,
            impact,
        })
    }
}

/// A census tract boundary and its demographic attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusTract {
    #[serde(rename = "tract_id")]
    pub id: TractId,
    pub geometry: Polygon<f64>,
    #[serde(default)]
    pub attributes: HashMap<String, f64>,
}

impl CensusTract {
    /// Returns the named attribute.
    ///
    /// # Errors
    ///
    /// Returns [`EquityError::MissingAttribute`] if the tract does not carry it.
    pub fn attribute(&self, name: &str) -> Result<f64, EquityError> {
        self.attributes
            .get(name)
            .copied()
            .ok_or_else(|| EquityError::MissingAttribute {
                tract_id: self.id.clone(),
                attribute: name.to_string(),
            })
    }
}

/// One scheduled departure from a stop, as found in GTFS `stop_times`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepartureRecord {
    pub stop_id: StopId,
    /// `H:MM:SS`; the hour may run past 23 for service after midnight.
    pub departure_time: String,
}

impl DepartureRecord {
    pub fn new(stop_id: StopId, departure_time: &str) -> Self {
        Self {
            stop_id,
            departure_time: departure_time.to_string(),
        }
    }
}
