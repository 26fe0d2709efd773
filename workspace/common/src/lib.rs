//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' response payloads so a
//! frontend can deserialize API responses without duplicating shapes.

mod forecast;
mod timeseries;

pub use forecast::{ForecastResponse, IntervalDto, ModelForecast, PredictionDto};
pub use timeseries::{DateRange, GroundTruthTimeseries, ObservationDto};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

// ===================== Locations =====================

/// Location reference row (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LocationDto {
    pub code: String,
    pub abbreviation: String,
    pub name: String,
    pub population: u64,
}

// ===================== Seasons =====================

/// A fixed season as shown in the season picker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeasonDto {
    pub id: String,
    pub display_label: String,
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
    pub ongoing: bool,
}

/// A rolling window recomputed from the latest reference date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DynamicPeriodDto {
    pub name: String,
    pub weeks: u32,
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

/// Response for the season listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeasonListing {
    pub seasons: Vec<SeasonDto>,
    pub dynamic_periods: Vec<DynamicPeriodDto>,
}

// ===================== Trends =====================

/// A model's nowcast of the direction of change at one date and location.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrendDto {
    pub model: String,
    pub date: chrono::NaiveDate,
    pub decrease: f64,
    pub stable: f64,
    pub increase: f64,
}

// ===================== Risk =====================

/// A classified rate: categorical level plus normalized display position.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RiskDto {
    /// Display label, e.g. "Low" or "No Data".
    pub level: String,
    /// Position in [0, 1) on the banded display axis, absent for No Data.
    pub position: Option<f64>,
}
