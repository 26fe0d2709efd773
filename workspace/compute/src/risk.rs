use model::threshold::RateThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical risk level derived from a weekly rate via a location's
/// thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    NoData,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::NoData => "No Data",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One display band: the axis segment a risk level occupies.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DisplayBand {
    level: RiskLevel,
    low: f64,
    high: f64,
}

/// A fixed partition of the [0, 1] display axis into risk bands.
///
/// The segments are deliberately not proportional to the data thresholds, so
/// every band stays visible no matter how skewed the real data is. The two
/// layouts below are the ones the dashboard widgets use; which one applies
/// is the caller's choice, passed into [`classify`].
#[derive(Clone, Debug, PartialEq)]
pub struct BandLayout {
    /// Bands in ascending level order. The last band is the cap for any
    /// level at or above it.
    bands: Vec<DisplayBand>,
}

/// Positions at or above the top threshold are pinned this far under the top
/// band's upper edge instead of extrapolating past the chart.
const TOP_CAP_MARGIN: f64 = 0.005;

impl BandLayout {
    /// Layout used by the compact trend widgets: Low, Medium, High, with
    /// rates beyond the very-high threshold capped inside the High band.
    pub fn three_band() -> Self {
        Self {
            bands: vec![
                DisplayBand {
                    level: RiskLevel::Low,
                    low: 0.0,
                    high: 0.4,
                },
                DisplayBand {
                    level: RiskLevel::Medium,
                    low: 0.4,
                    high: 0.9,
                },
                DisplayBand {
                    level: RiskLevel::High,
                    low: 0.9,
                    high: 1.0,
                },
            ],
        }
    }

    /// Layout used by the full risk gauge: equal quarters for Low, Medium,
    /// High, and Very High.
    pub fn four_band() -> Self {
        Self {
            bands: vec![
                DisplayBand {
                    level: RiskLevel::Low,
                    low: 0.0,
                    high: 0.25,
                },
                DisplayBand {
                    level: RiskLevel::Medium,
                    low: 0.25,
                    high: 0.5,
                },
                DisplayBand {
                    level: RiskLevel::High,
                    low: 0.5,
                    high: 0.75,
                },
                DisplayBand {
                    level: RiskLevel::VeryHigh,
                    low: 0.75,
                    high: 1.0,
                },
            ],
        }
    }

    /// The display band for a level; levels above the layout's top band
    /// collapse into it.
    fn band_for(&self, level: RiskLevel) -> &DisplayBand {
        self.bands
            .iter()
            .find(|band| band.level == level)
            .unwrap_or_else(|| {
                // bands is never empty; both constructors populate it.
                self.bands.last().expect("band layout has at least one band")
            })
    }
}

/// A classified rate: its level and where to draw it on the display axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Position in [0, 1), `None` when there is nothing to place.
    pub position: Option<f64>,
}

impl RiskAssessment {
    const NO_DATA: Self = Self {
        level: RiskLevel::NoData,
        position: None,
    };
}

/// Maps a weekly rate to a risk level and a normalized display position.
///
/// This is the single classification routine shared by every widget that
/// shows a threshold-relative value; only the band layout varies by caller.
/// A zero rate or missing thresholds classify as No Data rather than Low:
/// placeholder weeks carry a zero rate and must not read as a real
/// observation.
pub fn classify(
    value: f64,
    thresholds: Option<&RateThresholds>,
    layout: &BandLayout,
) -> RiskAssessment {
    let Some(thresholds) = thresholds else {
        return RiskAssessment::NO_DATA;
    };
    if value <= 0.0 || !thresholds.is_strictly_increasing() {
        return RiskAssessment::NO_DATA;
    }

    // Value bands are inclusive below, exclusive above; the top band is
    // unbounded and capped instead of interpolated.
    let (level, band_low, band_high) = if value < thresholds.medium {
        (RiskLevel::Low, 0.0, thresholds.medium)
    } else if value < thresholds.high {
        (RiskLevel::Medium, thresholds.medium, thresholds.high)
    } else if value < thresholds.very_high {
        (RiskLevel::High, thresholds.high, thresholds.very_high)
    } else {
        let band = layout.band_for(RiskLevel::VeryHigh);
        return RiskAssessment {
            level: RiskLevel::VeryHigh,
            position: Some(band.high - TOP_CAP_MARGIN),
        };
    };

    let band = layout.band_for(level);
    let fraction = (value - band_low) / (band_high - band_low);
    let mut position = band.low + fraction * (band.high - band.low);
    let top = layout.bands.last().expect("band layout is non-empty");
    if band.level == top.level {
        // Keep the top band's interpolation below the overflow cap so the
        // position stays non-decreasing as values cross the top threshold.
        position = position.min(band.high - TOP_CAP_MARGIN);
    }
    RiskAssessment {
        level,
        position: Some(position),
    }
}
