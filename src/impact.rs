//! Splitting and classifying the change in service at a stop.

/// Service gain at a stop; zero for stops that lost service.
pub fn doors_opening(impact: f64) -> f64 {
    impact.max(0.0)
}

/// Service loss at a stop as a non-negative magnitude; zero for stops that gained.
pub fn doors_closing(impact: f64) -> f64 {
    (-impact).max(0.0)
}

/// Whether a change in service is significant, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImpactClass {
    Loss,
    Neutral,
    Gain,
}

impl ImpactClass {
    /// -1, 0 or 1.
    pub fn as_i8(self) -> i8 {
        match self {
            ImpactClass::Loss => -1,
            ImpactClass::Neutral => 0,
            ImpactClass::Gain => 1,
        }
    }
}

/// Classifies `impact` against a significance `threshold`.
///
/// | Range                            | Class   |
/// |----------------------------------|---------|
/// | impact <= -threshold             | Loss    |
/// | -threshold < impact < threshold  | Neutral |
/// | impact >= threshold              | Gain    |
pub fn classify_impact(impact: f64, threshold: f64) -> ImpactClass {
    match impact {
        i if i <= -threshold => ImpactClass::Loss,
        i if i >= threshold => ImpactClass::Gain,
        _ => ImpactClass::Neutral,
    }
}

/// Restricts tract aggregation to stops that gained, lost, or all stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImpactFilter {
    Positive,
    Negative,
    #[default]
    All,
}

impl ImpactFilter {
    pub fn accepts(self, impact: f64) -> bool {
        match self {
            ImpactFilter::Positive => impact > 0.0,
            ImpactFilter::Negative => impact < 0.0,
            ImpactFilter::All => true,
        }
    }
}
