//! Departure counting and peak-hour filtering over GTFS `stop_times` rows.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EquityError;
use crate::model::{DepartureRecord, StopId};

/// Half-open window of hours `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakHours {
    pub start: f64,
    pub end: f64,
}

impl PeakHours {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: f64) -> bool {
        self.start <= hour && hour < self.end
    }
}

impl Default for PeakHours {
    /// Weekday morning peak, 7:00 to 10:00.
    fn default() -> Self {
        Self::new(7.0, 10.0)
    }
}

impl FromStr for PeakHours {
    type Err = EquityError;

    /// Parses `start,end`, e.g. `7,10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EquityError::InvalidPeakHours(s.to_string());
        let (start, end) = s.split_once(',').ok_or_else(invalid)?;
        let start = start.trim().parse::<f64>().map_err(|_| invalid())?;
        let end = end.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(Self::new(start, end))
    }
}

/// Number of departures scheduled at `stop_id`. Unknown stops count zero.
pub fn count_departures(stop_id: StopId, departures: &[DepartureRecord]) -> usize {
    departures.iter().filter(|d| d.stop_id == stop_id).count()
}

/// Reads the hour of an `H:MM:SS` time. Hours past 23 are kept as-is.
fn departure_hour(departure_time: &str) -> Result<f64, EquityError> {
    let text = departure_time.trim();
    let hour = text.split(':').next().unwrap_or_default().trim();
    hour.parse::<f64>()
        .map_err(|_| EquityError::MalformedTime(departure_time.to_string()))
}

/// Whether a departure at `departure_time` falls in the peak window.
///
/// # Errors
///
/// Returns [`EquityError::MalformedTime`] if the leading hour is not numeric.
pub fn is_peak(departure_time: &str, peak_hours: &PeakHours) -> Result<bool, EquityError> {
    Ok(peak_hours.contains(departure_hour(departure_time)?))
}

/// Keeps the departures inside the peak window, failing on the first malformed time.
pub fn peak_departures<'a>(
    departures: &'a [DepartureRecord],
    peak_hours: &PeakHours,
) -> Result<Vec<&'a DepartureRecord>, EquityError> {
    let mut peak = Vec::new();
    for departure in departures {
        if is_peak(&departure.departure_time, peak_hours)? {
            peak.push(departure);
        }
    }
    Ok(peak)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn morning() -> PeakHours {
        PeakHours::new(7.0, 10.0)
    }

    #[test]
    fn test_count_departures_matches_stop() {
        let departures = vec![
            DepartureRecord::new(66, "9:35:38"),
            DepartureRecord::new(66, "9:00:41"),
            DepartureRecord::new(12, "9:10:00"),
        ];
        assert_eq!(count_departures(66, &departures), 2);
        assert_eq!(count_departures(12, &departures), 1);
        assert_eq!(count_departures(999, &departures), 0);
    }

    #[test]
    fn test_count_departures_empty() {
        assert_eq!(count_departures(66, &[]), 0);
    }

    #[test]
    fn test_is_peak_window() {
        assert_eq!(is_peak("9:35:38", &morning()), Ok(true));
        assert_eq!(is_peak("6:59:59", &morning()), Ok(false));
        assert_eq!(is_peak("10:00:00", &morning()), Ok(false));
        assert_eq!(is_peak("07:00:00", &morning()), Ok(true));
    }

    #[test]
    fn test_is_peak_trims_whitespace() {
        assert_eq!(is_peak("  8:15:00 \n", &morning()), Ok(true));
    }

    #[test]
    fn test_is_peak_trims_hour_token() {
        assert_eq!(is_peak("9 :35:38", &morning()), Ok(true));
        assert_eq!(is_peak(" 6 :59:59", &morning()), Ok(false));
    }

    #[test]
    fn test_is_peak_after_midnight_service() {
        let late = PeakHours::new(24.0, 26.0);
        assert_eq!(is_peak("25:10:00", &late), Ok(true));
    }

    #[test]
    fn test_is_peak_malformed() {
        assert_eq!(
            is_peak("noon", &morning()),
            Err(EquityError::MalformedTime("noon".to_string()))
        );
        assert!(is_peak("", &morning()).is_err());
        assert!(is_peak(":30:00", &morning()).is_err());
    }

    #[test]
    fn test_peak_departures_filters() {
        let departures = vec![
            DepartureRecord::new(1, "6:30:00"),
            DepartureRecord::new(1, "7:45:00"),
            DepartureRecord::new(2, "9:59:59"),
            DepartureRecord::new(2, "17:05:00"),
        ];
        let peak = peak_departures(&departures, &morning()).unwrap();
        assert_eq!(peak.len(), 2);
        assert_eq!(peak[0].departure_time, "7:45:00");
        assert_eq!(peak[1].stop_id, 2);
    }

    #[test]
    fn test_peak_departures_propagates_malformed_time() {
        let departures = vec![
            DepartureRecord::new(1, "7:45:00"),
            DepartureRecord::new(1, "bad"),
        ];
        assert!(peak_departures(&departures, &morning()).is_err());
    }

    #[test]
    fn test_peak_hours_from_str() {
        assert_eq!("7,10".parse::<PeakHours>(), Ok(PeakHours::new(7.0, 10.0)));
        assert_eq!(
            " 16 , 18.5".parse::<PeakHours>(),
            Ok(PeakHours::new(16.0, 18.5))
        );
        assert!("7-10".parse::<PeakHours>().is_err());
        assert!("a,b".parse::<PeakHours>().is_err());
    }
}
