//! Error type shared by the metric functions.

use std::fmt;

/// Failures raised by the metric functions on malformed input.
///
/// Missing matches (a stop with no departures, a buffer touching no tract)
/// are not errors; they resolve to zero.
#[derive(Debug, Clone, PartialEq)]
pub enum EquityError {
    /// An axis token other than `"x"` or `"y"`.
    InvalidAxis(String),
    /// A departure time whose leading hour component is not numeric.
    MalformedTime(String),
    /// A peak-hour range that is not `start,end`.
    InvalidPeakHours(String),
    /// A geometry of the wrong kind for the requested extraction.
    UnsupportedGeometry {
        expected: &'static str,
        found: &'static str,
    },
    /// A tract without the demographic attribute being apportioned.
    MissingAttribute { tract_id: String, attribute: String },
    /// A buffer radius that is not positive, or fewer than three segments.
    InvalidBuffer { radius: f64, segments: usize },
}

impl fmt::Display for EquityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquityError::InvalidAxis(token) => {
                write!(f, "invalid axis '{token}', expected 'x' or 'y'")
            }
            EquityError::MalformedTime(text) => {
                write!(f, "cannot parse hour from departure time '{text}'")
            }
            EquityError::InvalidPeakHours(text) => {
                write!(f, "invalid peak hours '{text}', expected 'start,end'")
            }
            EquityError::UnsupportedGeometry { expected, found } => {
                write!(f, "expected {expected} geometry, found {found}")
            }
            EquityError::MissingAttribute {
                tract_id,
                attribute,
            } => write!(f, "tract '{tract_id}' has no attribute '{attribute}'"),
            EquityError::InvalidBuffer { radius, segments } => write!(
                f,
                "invalid buffer: radius {radius} must be positive and segments {segments} at least 3"
            ),
        }
    }
}

impl std::error::Error for EquityError {}
