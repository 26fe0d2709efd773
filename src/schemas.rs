use axum::{Json, http::StatusCode};
use chrono::NaiveDate;
use common::{
    ApiResponse, DateRange, DynamicPeriodDto, ForecastResponse, GroundTruthTimeseries,
    IntervalDto, LocationDto, ModelForecast, ObservationDto, PredictionDto, RiskDto,
    SeasonDto, SeasonListing, TrendDto,
};
use compute::{SeasonIndex, TimeSeriesStore};
use model::location::LocationRegistry;
use moka::future::Cache;
use serde::Deserialize;
use std::sync::{Arc, RwLock};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Everything the resolver reads: the store plus the reference data it is
/// keyed by. Constructed empty at startup, populated additively by the
/// loader, and read-only from the handlers' perspective.
#[derive(Debug)]
pub struct DashboardData {
    pub store: TimeSeriesStore,
    pub seasons: SeasonIndex,
    pub locations: LocationRegistry,
}

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Loaded data behind a single-writer lock: the loader takes the write
    /// guard per bulk commit, handlers only ever read.
    pub data: Arc<RwLock<DashboardData>>,
    /// Cache for expensive responses
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Timeseries(GroundTruthTimeseries),
    Forecasts(ForecastResponse),
}

/// Query parameters for the ground-truth timeseries endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TimeseriesQuery {
    /// Start date of the range (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// End date of the range (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

/// Query parameters for the multi-model forecast endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ForecastsQuery {
    /// Reference date the forecasts were issued for (YYYY-MM-DD)
    pub reference_date: NaiveDate,
    /// Model names to include (comma-separated); all models when omitted
    pub models: Option<String>,
    /// Maximum horizon in weeks; defaults to 3
    pub horizon: Option<i32>,
}

/// Query parameters for the single-model forecast endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ModelForecastQuery {
    /// Reference date the forecast was issued for (YYYY-MM-DD)
    pub reference_date: NaiveDate,
    /// Snap the reference date to the nearest date with data
    pub snap: Option<bool>,
}

/// Query parameters for the trend nowcast endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TrendQuery {
    /// Model publishing the nowcast
    pub model: String,
    /// Nowcast date (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Query parameters for the risk classification endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct RiskQuery {
    /// Weekly rate per 100k to classify
    pub value: f64,
    /// Display band count: 3 or 4 (default 4)
    pub bands: Option<u8>,
}

/// Error response
#[derive(Debug, serde::Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// A handler rejection: status plus a structured body, so clients can tell
/// "nothing to show" (200 with empty data) from "your request was invalid".
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Health check response
#[derive(Debug, serde::Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of locations in the reference data
    pub locations: usize,
    /// Number of fixed seasons in the index
    pub seasons: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::locations::get_locations,
        crate::handlers::seasons::get_seasons,
        crate::handlers::timeseries::get_location_timeseries,
        crate::handlers::forecasts::get_location_forecasts,
        crate::handlers::forecasts::get_model_forecast,
        crate::handlers::trends::get_location_trend,
        crate::handlers::risk::classify_location_risk,
    ),
    components(
        schemas(
            ApiResponse<Vec<LocationDto>>,
            ApiResponse<SeasonListing>,
            ApiResponse<GroundTruthTimeseries>,
            ApiResponse<ForecastResponse>,
            ApiResponse<ModelForecast>,
            ApiResponse<TrendDto>,
            ApiResponse<RiskDto>,
            ErrorResponse,
            HealthResponse,
            TimeseriesQuery,
            ForecastsQuery,
            ModelForecastQuery,
            TrendQuery,
            RiskQuery,
            LocationDto,
            SeasonDto,
            DynamicPeriodDto,
            SeasonListing,
            DateRange,
            ObservationDto,
            GroundTruthTimeseries,
            IntervalDto,
            PredictionDto,
            ModelForecast,
            ForecastResponse,
            TrendDto,
            RiskDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reference", description = "Location and season reference data"),
        (name = "timeseries", description = "Ground-truth timeseries endpoints"),
        (name = "forecasts", description = "Model forecast endpoints"),
        (name = "trends", description = "Trend nowcast endpoints"),
        (name = "risk", description = "Risk classification endpoints"),
    ),
    info(
        title = "Fluscope API",
        description = "Read API over loaded epidemiological forecast data: \
            ground-truth timeseries, model forecasts, trend nowcasts, and \
            threshold-based risk classification",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
