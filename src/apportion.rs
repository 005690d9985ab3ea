//! Areal apportionment between stop buffers and census tracts.
//!
//! A stop's buffer usually straddles several tracts. Each overlapping tract
//! contributes its attribute scaled by the share of the overlap in a reference
//! area: the buffer for proportions, the tract for counts. The two weightings
//! produce different units and are kept separate.

use geo::Polygon;
use tracing::trace;

use crate::error::EquityError;
use crate::geometry::Region;
use crate::impact::ImpactFilter;
use crate::model::{CensusTract, Stop};

#[derive(Clone, Copy)]
enum Denominator {
    Buffer,
    Tract,
}

fn apportion<R: Region + ?Sized>(
    buffer: &R,
    tracts: &[CensusTract],
    attribute: &str,
    denominator: Denominator,
) -> Result<f64, EquityError> {
    let buffer_area = buffer.area();
    let mut total = 0.0;

    for tract in tracts {
        let overlap = buffer.overlap_area(&tract.geometry);
        if overlap <= 0.0 {
            continue;
        }

        let reference = match denominator {
            Denominator::Buffer => buffer_area,
            Denominator::Tract => tract.geometry.area(),
        };
        if reference <= 0.0 {
            continue;
        }

        let weight = overlap / reference;
        let value = tract.attribute(attribute)?;
        trace!(tract_id = %tract.id, weight, value, "Tract contribution");
        total += weight * value;
    }

    Ok(total)
}

/// Area-weighted share of a proportion attribute (e.g. `prop_minority`) within `buffer`.
///
/// Each tract is weighted by `overlap / buffer area`, so a buffer lying inside a
/// single tract takes that tract's value. Zero when no tract overlaps.
///
/// # Errors
///
/// Returns [`EquityError::MissingAttribute`] if an overlapping tract lacks `attribute`.
pub fn proportional_demographic<R: Region + ?Sized>(
    buffer: &R,
    tracts: &[CensusTract],
    attribute: &str,
) -> Result<f64, EquityError> {
    apportion(buffer, tracts, attribute, Denominator::Buffer)
}

/// Estimated count of a group (e.g. `minority`) living within `buffer`.
///
/// Each tract is weighted by `overlap / tract area`, assuming the group is spread
/// evenly over the tract.
///
/// # Errors
///
/// Returns [`EquityError::MissingAttribute`] if an overlapping tract lacks `attribute`.
pub fn count_demographic<R: Region + ?Sized>(
    buffer: &R,
    tracts: &[CensusTract],
    attribute: &str,
) -> Result<f64, EquityError> {
    apportion(buffer, tracts, attribute, Denominator::Tract)
}

/// Change in service attributed to a tract.
///
/// Every stop accepted by `filter` contributes its impact scaled by the share of
/// its buffer that falls inside `tract`.
pub fn tract_impact(tract: &Polygon<f64>, stops: &[Stop], filter: ImpactFilter) -> f64 {
    stops
        .iter()
        .filter(|stop| filter.accepts(stop.impact))
        .filter_map(|stop| {
            let overlap = stop.buffer.overlap_area(tract);
            let buffer_area = stop.buffer.area();
            (overlap > 0.0 && buffer_area > 0.0).then(|| stop.impact * overlap / buffer_area)
        })
        .sum()
}
