use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use common::{ApiResponse, GroundTruthTimeseries};
use compute::QueryResolver;
use tracing::instrument;

use crate::handlers::{lock_poisoned, map_query_error};
use crate::helpers::converters::points_to_timeseries;
use crate::schemas::{ApiError, AppState, CachedData, TimeseriesQuery};

/// Get the continuous ground-truth timeseries for a location
#[utoipa::path(
    get,
    path = "/api/v1/locations/{code}/timeseries",
    tag = "timeseries",
    params(
        ("code" = String, Path, description = "Location code"),
        TimeseriesQuery,
    ),
    responses(
        (status = 200, description = "Timeseries retrieved successfully", body = ApiResponse<GroundTruthTimeseries>),
        (status = 400, description = "Malformed date range", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Unknown location", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_location_timeseries(
    Path(code): Path<String>,
    Query(query): Query<TimeseriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<GroundTruthTimeseries>>, ApiError> {
    // Create cache key
    let cache_key = format!("timeseries_{}_{:?}", code, query);

    // Check cache first
    if let Some(CachedData::Timeseries(timeseries)) = state.cache.get(&cache_key).await {
        return Ok(Json(ApiResponse {
            data: timeseries,
            message: "Timeseries retrieved from cache".to_string(),
            success: true,
        }));
    }

    // Resolve under the read guard; the guard must not be held across awaits.
    let timeseries = {
        let data = state.data.read().map_err(|_| lock_poisoned())?;
        let resolver = QueryResolver::new(&data.store, &data.seasons, &data.locations);
        let points = resolver
            .ground_truth_in_range(query.start_date, query.end_date, &code)
            .map_err(map_query_error)?;
        points_to_timeseries(&code, points)
    };

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Timeseries(timeseries.clone()))
        .await;

    Ok(Json(ApiResponse {
        data: timeseries,
        message: "Timeseries retrieved successfully".to_string(),
        success: true,
    }))
}
