use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use common::{ApiResponse, ForecastResponse, ModelForecast};
use compute::QueryResolver;
use tracing::{debug, instrument};

use crate::handlers::{lock_poisoned, map_query_error};
use crate::helpers::converters::{forecasts_to_response, series_to_dtos};
use crate::schemas::{ApiError, AppState, CachedData, ForecastsQuery, ModelForecastQuery};

/// Horizon cutoff applied when the query does not name one: the reference
/// week plus three forecast weeks, the span the charts draw.
const DEFAULT_MAX_HORIZON: i32 = 3;

/// Get forecasts from multiple models for a location and reference week
#[utoipa::path(
    get,
    path = "/api/v1/locations/{code}/forecasts",
    tag = "forecasts",
    params(
        ("code" = String, Path, description = "Location code"),
        ForecastsQuery,
    ),
    responses(
        (status = 200, description = "Forecasts retrieved successfully", body = ApiResponse<ForecastResponse>),
        (status = 404, description = "Unknown location", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_location_forecasts(
    Path(code): Path<String>,
    Query(query): Query<ForecastsQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastResponse>>, ApiError> {
    // Create cache key
    let cache_key = format!("forecasts_{}_{:?}", code, query);

    // Check cache first
    if let Some(CachedData::Forecasts(forecasts)) = state.cache.get(&cache_key).await {
        return Ok(Json(ApiResponse {
            data: forecasts,
            message: "Forecasts retrieved from cache".to_string(),
            success: true,
        }));
    }

    let max_horizon = query.horizon.unwrap_or(DEFAULT_MAX_HORIZON);
    let response = {
        let data = state.data.read().map_err(|_| lock_poisoned())?;
        let resolver = QueryResolver::new(&data.store, &data.seasons, &data.locations);

        // An explicit model list filters; omitting it asks every model with
        // data in the reference date's season.
        let models: Vec<String> = match &query.models {
            Some(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            None => data
                .seasons
                .resolve_for_date(query.reference_date)
                .map(|season| data.store.models(season))
                .unwrap_or_default(),
        };
        debug!(models = models.len(), "resolving forecasts");

        let forecasts = resolver
            .predictions_for_models(&models, &code, query.reference_date, max_horizon)
            .map_err(map_query_error)?;
        forecasts_to_response(&code, query.reference_date, forecasts)
    };

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Forecasts(response.clone()))
        .await;

    Ok(Json(ApiResponse {
        data: response,
        message: "Forecasts retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get one model's forecast for a location and reference week
#[utoipa::path(
    get,
    path = "/api/v1/locations/{code}/forecasts/{model}",
    tag = "forecasts",
    params(
        ("code" = String, Path, description = "Location code"),
        ("model" = String, Path, description = "Model name"),
        ModelForecastQuery,
    ),
    responses(
        (status = 200, description = "Forecast retrieved; data is null when the model has none", body = ApiResponse<ModelForecast>),
        (status = 404, description = "Unknown location", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_model_forecast(
    Path((code, model)): Path<(String, String)>,
    Query(query): Query<ModelForecastQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<ModelForecast>>>, ApiError> {
    let data = state.data.read().map_err(|_| lock_poisoned())?;
    let resolver = QueryResolver::new(&data.store, &data.seasons, &data.locations);

    // When asked, snap the requested week to the nearest date that has any
    // data for this model and location.
    let reference_date = if query.snap.unwrap_or(false) {
        data.seasons
            .resolve_for_date(query.reference_date)
            .and_then(|season| {
                let candidates = resolver.combined_dates(season, &model, &code);
                resolver.snap_to_nearest_date(candidates, query.reference_date)
            })
            .unwrap_or(query.reference_date)
    } else {
        query.reference_date
    };

    let forecast = resolver
        .prediction_for_model_week(&model, &code, reference_date)
        .map_err(map_query_error)?
        .map(|series| ModelForecast {
            model: model.clone(),
            predictions: series_to_dtos(&series),
        });

    let message = if forecast.is_some() {
        "Forecast retrieved successfully".to_string()
    } else {
        "No forecast for this model and week".to_string()
    };
    Ok(Json(ApiResponse {
        data: forecast,
        message,
        success: true,
    }))
}
