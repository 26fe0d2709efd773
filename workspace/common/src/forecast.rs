use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A paired interval bound at a named confidence width.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IntervalDto {
    /// Confidence width label, e.g. "50" or "95".
    pub width: String,
    pub lower: f64,
    pub upper: f64,
}

/// One predicted week.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PredictionDto {
    pub target_date: NaiveDate,
    /// Whole weeks from the reference date to the target date.
    pub horizon: i32,
    pub median: f64,
    pub intervals: Vec<IntervalDto>,
}

/// One model's predictions for the queried reference week, ascending by
/// target date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ModelForecast {
    pub model: String,
    pub predictions: Vec<PredictionDto>,
}

/// Forecasts from every matched model for one location and reference week.
/// Models with no matching predictions are omitted, not sent empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastResponse {
    pub location: String,
    pub reference_date: NaiveDate,
    pub models: Vec<ModelForecast>,
}
