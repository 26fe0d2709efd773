use axum::{extract::State, response::Json};
use common::{ApiResponse, LocationDto};
use tracing::instrument;

use crate::handlers::lock_poisoned;
use crate::schemas::{ApiError, AppState};

/// List the location reference data
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    tag = "reference",
    responses(
        (status = 200, description = "Locations retrieved successfully", body = ApiResponse<Vec<LocationDto>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_locations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LocationDto>>>, ApiError> {
    let data = state.data.read().map_err(|_| lock_poisoned())?;

    let locations: Vec<LocationDto> = data
        .locations
        .iter()
        .map(|location| LocationDto {
            code: location.code.clone(),
            abbreviation: location.abbreviation.clone(),
            name: location.name.clone(),
            population: location.population,
        })
        .collect();

    Ok(Json(ApiResponse {
        data: locations,
        message: "Locations retrieved successfully".to_string(),
        success: true,
    }))
}
