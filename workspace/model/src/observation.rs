use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel admissions count marking a week with no published observation.
/// Placeholder entries exist so charts get a continuous date axis; they must
/// never be summed or averaged as a real zero.
pub const PLACEHOLDER_ADMISSIONS: i64 = -1;

/// The observed value at one (season, date, location) key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationValue {
    /// Weekly hospital admissions count, or `PLACEHOLDER_ADMISSIONS`.
    pub admissions: i64,
    /// Admissions per 100k population for the same week.
    pub weekly_rate: f64,
}

impl ObservationValue {
    pub fn is_placeholder(&self) -> bool {
        self.admissions == PLACEHOLDER_ADMISSIONS
    }
}

/// One point of a location's ground-truth time series, as returned by range
/// queries: the observed value together with its date and location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint {
    pub date: NaiveDate,
    pub location: String,
    pub admissions: i64,
    pub weekly_rate: f64,
}

impl ObservationPoint {
    pub fn new(date: NaiveDate, location: impl Into<String>, value: ObservationValue) -> Self {
        Self {
            date,
            location: location.into(),
            admissions: value.admissions,
            weekly_rate: value.weekly_rate,
        }
    }

    /// A synthesized entry for a week with no published data.
    pub fn placeholder(date: NaiveDate, location: impl Into<String>) -> Self {
        Self {
            date,
            location: location.into(),
            admissions: PLACEHOLDER_ADMISSIONS,
            weekly_rate: 0.0,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.admissions == PLACEHOLDER_ADMISSIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_marked_by_sentinel() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let point = ObservationPoint::placeholder(date, "06");

        assert!(point.is_placeholder());
        assert_eq!(point.admissions, PLACEHOLDER_ADMISSIONS);
        assert_eq!(point.weekly_rate, 0.0);
    }

    #[test]
    fn test_real_observation_is_not_placeholder() {
        let value = ObservationValue {
            admissions: 0,
            weekly_rate: 0.0,
        };
        // A true zero observation is distinct from a placeholder.
        assert!(!value.is_placeholder());
    }
}
