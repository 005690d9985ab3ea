use anyhow::{Context, Result};
use serde::Deserialize;

use crate::departures::PeakHours;
use crate::geometry::{DEFAULT_BUFFER_SEGMENTS, QUARTER_MILE_METRES, check_buffer};

/// Parameters of an equity analysis run.
///
/// Stored as a JSON object on disk; every field is optional:
/// ```json
/// {
///   "peak_hours": { "start": 7, "end": 10 },
///   "impact_threshold": 10,
///   "buffer_radius": 402.336,
///   "buffer_segments": 64,
///   "proportion_attribute": "prop_minority",
///   "count_attribute": "minority",
///   "peak_only": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub peak_hours: PeakHours,
    /// Margin beyond which a change in departures is significant.
    pub impact_threshold: f64,
    /// Catchment radius around each stop, in the units of the input coordinates.
    pub buffer_radius: f64,
    pub buffer_segments: usize,
    pub proportion_attribute: String,
    pub count_attribute: String,
    /// Count only departures inside `peak_hours`.
    pub peak_only: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            peak_hours: PeakHours::default(),
            impact_threshold: 10.0,
            buffer_radius: QUARTER_MILE_METRES,
            buffer_segments: DEFAULT_BUFFER_SEGMENTS,
            proportion_attribute: "prop_minority".to_string(),
            count_attribute: "minority".to_string(),
            peak_only: true,
        }
    }
}

impl AnalysisConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{path}'"))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config '{path}'"))?;
        config
            .validate()
            .with_context(|| format!("invalid config '{path}'"))?;
        Ok(config)
    }

    /// Rejects buffer settings that would give stops a zero or inverted catchment.
    pub fn validate(&self) -> Result<()> {
        check_buffer(self.buffer_radius, self.buffer_segments)?;
        Ok(())
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(mut self, peak_hours: Option<PeakHours>, threshold: Option<f64>) -> Self {
        if let Some(peak_hours) = peak_hours {
            self.peak_hours = peak_hours;
        }
        if let Some(threshold) = threshold {
            self.impact_threshold = threshold;
        }
        self
    }
}
