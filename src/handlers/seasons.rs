use axum::{extract::State, response::Json};
use common::{ApiResponse, DynamicPeriodDto, SeasonDto, SeasonListing};
use tracing::instrument;

use crate::handlers::lock_poisoned;
use crate::schemas::{ApiError, AppState};

/// List fixed seasons and the current dynamic periods
#[utoipa::path(
    get,
    path = "/api/v1/seasons",
    tag = "reference",
    responses(
        (status = 200, description = "Seasons retrieved successfully", body = ApiResponse<SeasonListing>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_seasons(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SeasonListing>>, ApiError> {
    let data = state.data.read().map_err(|_| lock_poisoned())?;

    let seasons: Vec<SeasonDto> = data
        .seasons
        .seasons()
        .iter()
        .map(|season| SeasonDto {
            id: season.id.clone(),
            display_label: season.display_label.clone(),
            start: season.start,
            end: season.end,
            ongoing: season.ongoing,
        })
        .collect();

    let mut dynamic_periods: Vec<DynamicPeriodDto> = data
        .seasons
        .dynamic_periods()
        .map(|period| DynamicPeriodDto {
            name: period.name.clone(),
            weeks: period.weeks,
            start: period.start,
            end: period.end,
        })
        .collect();
    dynamic_periods.sort_by_key(|period| period.weeks);

    Ok(Json(ApiResponse {
        data: SeasonListing {
            seasons,
            dynamic_periods,
        },
        message: "Seasons retrieved successfully".to_string(),
        success: true,
    }))
}
