//! Coordinate extraction for plotting points, lines and polygon outlines.

use std::str::FromStr;

use geo::{Coord, Geometry, LineString};
use serde::Serialize;

use crate::error::EquityError;

/// Which coordinate component to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn pick(self, c: &Coord<f64>) -> f64 {
        match self {
            Axis::X => c.x,
            Axis::Y => c.y,
        }
    }
}

impl FromStr for Axis {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            other => Err(EquityError::InvalidAxis(other.to_string())),
        }
    }
}

/// Coordinates of a line, or one sequence per component of a multi-line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LineCoords {
    Single(Vec<f64>),
    Multi(Vec<Vec<f64>>),
}

fn kind(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

fn ring(line: &LineString<f64>, axis: Axis) -> Vec<f64> {
    line.coords().map(|c| axis.pick(c)).collect()
}

pub fn is_multi_line(geom: &Geometry<f64>) -> bool {
    matches!(geom, Geometry::MultiLineString(_))
}

/// Extracts `axis` values along a line, or per component of a multi-line.
///
/// Plot single and multi-lines separately, using [`is_multi_line`] to tell them apart.
pub fn line_coordinates(geom: &Geometry<f64>, axis: Axis) -> Result<LineCoords, EquityError> {
    match geom {
        Geometry::LineString(line) => Ok(LineCoords::Single(ring(line, axis))),
        Geometry::Line(line) => Ok(LineCoords::Single(vec![
            axis.pick(&line.start),
            axis.pick(&line.end),
        ])),
        Geometry::MultiLineString(lines) => Ok(LineCoords::Multi(
            lines.iter().map(|line| ring(line, axis)).collect(),
        )),
        other => Err(EquityError::UnsupportedGeometry {
            expected: "LineString or MultiLineString",
            found: kind(other),
        }),
    }
}

pub fn point_coordinate(geom: &Geometry<f64>, axis: Axis) -> Result<f64, EquityError> {
    match geom {
        Geometry::Point(p) => Ok(axis.pick(&p.0)),
        other => Err(EquityError::UnsupportedGeometry {
            expected: "Point",
            found: kind(other),
        }),
    }
}

/// Extracts `axis` values of the exterior ring, closing vertex included.
pub fn polygon_coordinates(geom: &Geometry<f64>, axis: Axis) -> Result<Vec<f64>, EquityError> {
    match geom {
        Geometry::Polygon(poly) => Ok(ring(poly.exterior(), axis)),
        other => Err(EquityError::UnsupportedGeometry {
            expected: "Polygon",
            found: kind(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{MultiLineString, Point, line_string, polygon};

    fn two_part_multi_line() -> Geometry<f64> {
        Geometry::MultiLineString(MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 2.0, y: 1.5)],
            line_string![(x: 5.0, y: 5.0), (x: 6.0, y: 7.0)],
        ]))
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("y".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!(
            "z".parse::<Axis>(),
            Err(EquityError::InvalidAxis("z".to_string()))
        );
        assert!("X".parse::<Axis>().is_err());
    }

    #[test]
    fn test_is_multi_line() {
        assert!(is_multi_line(&two_part_multi_line()));
        let single = Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]);
        assert!(!is_multi_line(&single));
        assert!(!is_multi_line(&Geometry::Point(Point::new(1.0, 2.0))));
    }

    #[test]
    fn test_line_coordinates_single() {
        let line = Geometry::LineString(line_string![(x: 0.0, y: 3.0), (x: 1.0, y: 4.0)]);
        assert_eq!(
            line_coordinates(&line, Axis::X).unwrap(),
            LineCoords::Single(vec![0.0, 1.0])
        );
        assert_eq!(
            line_coordinates(&line, Axis::Y).unwrap(),
            LineCoords::Single(vec![3.0, 4.0])
        );
    }

    #[test]
    fn test_line_coordinates_multi_preserves_components() {
        let coords = line_coordinates(&two_part_multi_line(), Axis::Y).unwrap();
        match coords {
            LineCoords::Multi(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0], vec![0.0, 1.0, 1.5]);
                assert_eq!(parts[1], vec![5.0, 7.0]);
            }
            LineCoords::Single(_) => panic!("expected one sequence per component"),
        }
    }

    #[test]
    fn test_line_coordinates_rejects_polygon() {
        let poly = Geometry::Polygon(polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]);
        assert_eq!(
            line_coordinates(&poly, Axis::X),
            Err(EquityError::UnsupportedGeometry {
                expected: "LineString or MultiLineString",
                found: "Polygon",
            })
        );
    }

    #[test]
    fn test_point_coordinate_round_trip() {
        let p = Geometry::Point(Point::new(-97.74, 30.27));
        assert_eq!(point_coordinate(&p, Axis::X), Ok(-97.74));
        assert_eq!(point_coordinate(&p, Axis::Y), Ok(30.27));
    }

    #[test]
    fn test_polygon_coordinates_exterior_ring() {
        let poly = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 3.0),
        ]);
        assert_eq!(
            polygon_coordinates(&poly, Axis::X).unwrap(),
            vec![0.0, 2.0, 2.0, 0.0]
        );
        assert_eq!(
            polygon_coordinates(&poly, Axis::Y).unwrap(),
            vec![0.0, 0.0, 3.0, 0.0]
        );
    }

    #[test]
    fn test_line_coords_serialize_untagged() {
        let json = serde_json::to_string(&LineCoords::Multi(vec![vec![1.0], vec![2.0]])).unwrap();
        assert_eq!(json, "[[1.0],[2.0]]");
    }
}
