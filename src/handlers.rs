pub mod forecasts;
pub mod health;
pub mod locations;
pub mod risk;
pub mod seasons;
pub mod timeseries;
pub mod trends;

use axum::http::StatusCode;
use compute::QueryError;

use crate::schemas::{ApiError, api_error};

/// Maps a resolver rejection onto the wire: a backwards range is the
/// caller's mistake, an unknown location is a missing resource. Missing
/// data never reaches this path; it is served as an empty 200.
pub(crate) fn map_query_error(error: QueryError) -> ApiError {
    match error {
        QueryError::InvalidDateRange { .. } => {
            api_error(StatusCode::BAD_REQUEST, "INVALID_RANGE", error.to_string())
        }
        QueryError::UnknownLocation(_) => {
            api_error(StatusCode::NOT_FOUND, "UNKNOWN_LOCATION", error.to_string())
        }
    }
}

/// The store lock is only poisoned if a writer panicked mid-commit.
pub(crate) fn lock_poisoned() -> ApiError {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL",
        "dashboard data unavailable",
    )
}
