use axum::{extract::State, response::Json};
use tracing::instrument;

use crate::handlers::lock_poisoned;
use crate::schemas::{ApiError, AppState, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let data = state.data.read().map_err(|_| lock_poisoned())?;

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        locations: data.locations.len(),
        seasons: data.seasons.seasons().len(),
    };

    Ok(Json(response))
}
