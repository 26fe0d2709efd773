use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{ApiResponse, RiskDto};
use compute::{BandLayout, classify};
use tracing::instrument;

use crate::handlers::lock_poisoned;
use crate::schemas::{ApiError, AppState, RiskQuery, api_error};

/// Classify a weekly rate against a location's thresholds
#[utoipa::path(
    get,
    path = "/api/v1/locations/{code}/risk",
    tag = "risk",
    params(
        ("code" = String, Path, description = "Location code"),
        RiskQuery,
    ),
    responses(
        (status = 200, description = "Rate classified successfully", body = ApiResponse<RiskDto>),
        (status = 400, description = "Unsupported band count", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Unknown location", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn classify_location_risk(
    Path(code): Path<String>,
    Query(query): Query<RiskQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RiskDto>>, ApiError> {
    let layout = match query.bands {
        Some(3) => BandLayout::three_band(),
        Some(4) | None => BandLayout::four_band(),
        Some(other) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_BANDS",
                format!("unsupported band count: {other}"),
            ));
        }
    };

    let data = state.data.read().map_err(|_| lock_poisoned())?;
    if !data.locations.contains(&code) {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "UNKNOWN_LOCATION",
            format!("unknown location code: {code}"),
        ));
    }

    let assessment = classify(query.value, data.store.thresholds(&code), &layout);

    Ok(Json(ApiResponse {
        data: RiskDto {
            level: assessment.level.as_str().to_string(),
            position: assessment.position,
        },
        message: "Rate classified successfully".to_string(),
        success: true,
    }))
}
