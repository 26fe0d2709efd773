use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive date range covered by a payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One week of a location's ground-truth series. Placeholder weeks are
/// transported as `null` values rather than the internal sentinel, so
/// clients cannot mistake them for real zeros.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ObservationDto {
    pub date: NaiveDate,
    /// Weekly admissions count; absent for placeholder weeks.
    pub admissions: Option<i64>,
    /// Admissions per 100k; absent for placeholder weeks.
    pub weekly_rate: Option<f64>,
}

impl ObservationDto {
    pub fn is_placeholder(&self) -> bool {
        self.admissions.is_none()
    }
}

/// A location's continuous weekly ground-truth series.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GroundTruthTimeseries {
    pub location: String,
    /// Range actually covered; absent when there are no points.
    pub range: Option<DateRange>,
    pub points: Vec<ObservationDto>,
}

impl GroundTruthTimeseries {
    pub fn new(location: impl Into<String>, points: Vec<ObservationDto>) -> Self {
        let range = match (points.first(), points.last()) {
            (Some(first), Some(last)) => Some(DateRange {
                start: first.date,
                end: last.date,
            }),
            _ => None,
        };
        Self {
            location: location.into(),
            range,
            points,
        }
    }
}
