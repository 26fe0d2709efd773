use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{ApiResponse, TrendDto};
use tracing::instrument;

use crate::handlers::lock_poisoned;
use crate::schemas::{ApiError, AppState, TrendQuery, api_error};

/// Get a model's trend nowcast for a location and date
#[utoipa::path(
    get,
    path = "/api/v1/locations/{code}/trends",
    tag = "trends",
    params(
        ("code" = String, Path, description = "Location code"),
        TrendQuery,
    ),
    responses(
        (status = 200, description = "Trend retrieved; data is null when the model has none", body = ApiResponse<TrendDto>),
        (status = 404, description = "Unknown location", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_location_trend(
    Path(code): Path<String>,
    Query(query): Query<TrendQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<TrendDto>>>, ApiError> {
    let data = state.data.read().map_err(|_| lock_poisoned())?;
    if !data.locations.contains(&code) {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "UNKNOWN_LOCATION",
            format!("unknown location code: {code}"),
        ));
    }

    let trend = data
        .store
        .trend(&query.model, query.date, &code)
        .map(|trend| TrendDto {
            model: query.model.clone(),
            date: query.date,
            decrease: trend.decrease,
            stable: trend.stable,
            increase: trend.increase,
        });

    let message = if trend.is_some() {
        "Trend retrieved successfully".to_string()
    } else {
        "No trend for this model and date".to_string()
    };
    Ok(Json(ApiResponse {
        data: trend,
        message,
        success: true,
    }))
}
