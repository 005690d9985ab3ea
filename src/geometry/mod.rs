//! Planar geometry helpers.
//!
//! [`Region`] is the capability set apportionment needs from a catchment:
//! its own area and the area it shares with a polygon. It is implemented for
//! a single [`Polygon`] (one stop buffer) and a [`MultiPolygon`] (the union of
//! many buffers), so stop-level and catchment-wide metrics share one code path.

pub mod coords;

use std::f64::consts::TAU;

use geo::{Area, BooleanOps, Coord, Intersects, LineString, MultiPolygon, Point, Polygon};

use crate::error::EquityError;
use crate::model::Stop;

/// Walking distance of a quarter mile, in metres.
pub const QUARTER_MILE_METRES: f64 = 402.336;

/// Default number of vertices used to approximate a buffer disk.
pub const DEFAULT_BUFFER_SEGMENTS: usize = 64;

/// Area-bearing geometry that can be intersected with a polygon.
pub trait Region {
    /// Unsigned planar area.
    fn area(&self) -> f64;

    /// Area of the intersection with `other`; 0.0 when they do not overlap.
    fn overlap_area(&self, other: &Polygon<f64>) -> f64;
}

impl Region for Polygon<f64> {
    fn area(&self) -> f64 {
        self.unsigned_area()
    }

    fn overlap_area(&self, other: &Polygon<f64>) -> f64 {
        if !self.intersects(other) {
            return 0.0;
        }
        self.intersection(other).unsigned_area()
    }
}

impl Region for MultiPolygon<f64> {
    fn area(&self) -> f64 {
        self.unsigned_area()
    }

    fn overlap_area(&self, other: &Polygon<f64>) -> f64 {
        if !self.intersects(other) {
            return 0.0;
        }
        self.intersection(&MultiPolygon::new(vec![other.clone()]))
            .unsigned_area()
    }
}

/// Checks that `radius` and `segments` describe a buffer with positive area.
pub fn check_buffer(radius: f64, segments: usize) -> Result<(), EquityError> {
    if radius.is_finite() && radius > 0.0 && segments >= 3 {
        Ok(())
    } else {
        Err(EquityError::InvalidBuffer { radius, segments })
    }
}

/// Approximates the disk of `radius` around `center` with a regular polygon.
///
/// # Errors
///
/// Returns [`EquityError::InvalidBuffer`] unless `radius > 0` and `segments >= 3`.
pub fn stop_buffer(
    center: Point<f64>,
    radius: f64,
    segments: usize,
) -> Result<Polygon<f64>, EquityError> {
    check_buffer(radius, segments)?;
    let ring: Vec<Coord<f64>> = (0..segments)
        .map(|i| {
            let theta = TAU * i as f64 / segments as f64;
            Coord {
                x: center.x() + radius * theta.cos(),
                y: center.y() + radius * theta.sin(),
            }
        })
        .collect();

    Ok(Polygon::new(LineString::new(ring), vec![]))
}

/// Union of every stop buffer: the service area of the whole network.
///
/// Buffers are merged pairwise in rounds until one multi-polygon remains.
pub fn catchment(stops: &[Stop]) -> MultiPolygon<f64> {
    let mut layer: Vec<MultiPolygon<f64>> = stops
        .iter()
        .map(|stop| MultiPolygon::new(vec![stop.buffer.clone()]))
        .collect();

    while layer.len() > 1 {
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        let mut parts = layer.into_iter();
        while let Some(left) = parts.next() {
            match parts.next() {
                Some(right) => next.push(left.union(&right)),
                None => next.push(left),
            }
        }
        layer = next;
    }

    layer.pop().unwrap_or_else(|| MultiPolygon::new(vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::polygon;

    fn square(x0: f64, y0: f64, side: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + side, y: y0),
            (x: x0 + side, y: y0 + side),
            (x: x0, y: y0 + side),
        ]
    }

    #[test]
    fn test_stop_buffer_vertex_count_and_area() {
        let buffer = stop_buffer(Point::new(0.0, 0.0), 1.0, 256).unwrap();
        // closed ring repeats the first vertex
        assert_eq!(buffer.exterior().0.len(), 257);
        assert_relative_eq!(buffer.area(), std::f64::consts::PI, epsilon = 1e-3);
    }

    #[test]
    fn test_stop_buffer_triangle_is_smallest() {
        let buffer = stop_buffer(Point::new(0.0, 0.0), 1.0, 3).unwrap();
        assert_eq!(buffer.exterior().0.len(), 4);
    }

    #[test]
    fn test_stop_buffer_rejects_degenerate_shapes() {
        let center = Point::new(0.0, 0.0);
        assert_eq!(
            stop_buffer(center, 0.0, 64),
            Err(EquityError::InvalidBuffer {
                radius: 0.0,
                segments: 64
            })
        );
        assert!(stop_buffer(center, -5.0, 64).is_err());
        assert!(stop_buffer(center, f64::NAN, 64).is_err());
        assert!(stop_buffer(center, 1.0, 2).is_err());
    }

    #[test]
    fn test_overlap_area_disjoint_is_zero() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        assert_eq!(a.overlap_area(&b), 0.0);
    }

    #[test]
    fn test_overlap_area_half() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 0.0, 2.0);
        assert_relative_eq!(a.overlap_area(&b), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_multipolygon_overlap_area() {
        let both = MultiPolygon::new(vec![square(0.0, 0.0, 1.0), square(3.0, 0.0, 1.0)]);
        let strip = square(0.0, 0.0, 4.0);
        assert_relative_eq!(both.area(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(both.overlap_area(&strip), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_catchment_merges_overlapping_buffers() {
        let a = Stop::new(1, Point::new(0.0, 0.0), 0.0, 1.0, 64).unwrap();
        let b = Stop::new(2, Point::new(0.5, 0.0), 0.0, 1.0, 64).unwrap();
        let union = catchment(&[a.clone(), b.clone()]);

        assert!(union.area() > a.buffer.area());
        assert!(union.area() < a.buffer.area() + b.buffer.area());
    }

    #[test]
    fn test_catchment_keeps_disjoint_buffers_apart() {
        let stops: Vec<Stop> = (0..5)
            .map(|i| Stop::new(i, Point::new(i as f64 * 10.0, 0.0), 0.0, 1.0, 64).unwrap())
            .collect();
        let union = catchment(&stops);

        assert_eq!(union.0.len(), 5);
        assert_relative_eq!(union.area(), 5.0 * stops[0].buffer.area(), epsilon = 1e-6);
    }

    #[test]
    fn test_catchment_of_chained_buffers_is_one_polygon() {
        // odd count exercises the carried-over last buffer in each round
        let stops: Vec<Stop> = (0..7)
            .map(|i| Stop::new(i, Point::new(i as f64, 0.0), 0.0, 1.0, 64).unwrap())
            .collect();
        let union = catchment(&stops);
        let single = stops[0].buffer.area();

        assert_eq!(union.0.len(), 1);
        assert!(union.area() > 4.0 * single && union.area() < 7.0 * single);
    }

    #[test]
    fn test_catchment_of_no_stops_is_empty() {
        let union = catchment(&[]);
        assert!(union.0.is_empty());
        assert_eq!(union.area(), 0.0);
    }
}
