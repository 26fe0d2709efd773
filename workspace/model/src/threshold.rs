use serde::{Deserialize, Serialize};

/// Per-location rate thresholds separating the risk levels. The bounds are
/// weekly rates per 100k and must be strictly increasing; a set that is not
/// is rejected at load time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateThresholds {
    /// Rates at or above this are at least Medium risk.
    pub medium: f64,
    /// Rates at or above this are at least High risk.
    pub high: f64,
    /// Rates at or above this are Very High risk.
    pub very_high: f64,
}

impl RateThresholds {
    pub fn is_strictly_increasing(&self) -> bool {
        self.medium > 0.0 && self.medium < self.high && self.high < self.very_high
    }
}
