use serde::{Deserialize, Serialize};

/// How far a trend's probabilities may drift from summing to one before the
/// loader warns. Upstream files carry small floating error.
pub const TREND_SUM_TOLERANCE: f64 = 0.02;

/// A model's nowcast of the direction of change at one (date, location):
/// probabilities that admissions are decreasing, stable, or increasing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NowcastTrend {
    pub decrease: f64,
    pub stable: f64,
    pub increase: f64,
}

impl NowcastTrend {
    pub fn sum(&self) -> f64 {
        self.decrease + self.stable + self.increase
    }

    /// True when all probabilities are in [0, 1] and the total is close to 1.
    pub fn is_plausible(&self) -> bool {
        let in_unit = |p: f64| (0.0..=1.0).contains(&p);
        in_unit(self.decrease)
            && in_unit(self.stable)
            && in_unit(self.increase)
            && (self.sum() - 1.0).abs() <= TREND_SUM_TOLERANCE
    }
}
