use crate::handlers::{
    forecasts::{get_location_forecasts, get_model_forecast},
    health::health_check,
    locations::get_locations,
    risk::classify_location_risk,
    seasons::get_seasons,
    timeseries::get_location_timeseries,
    trends::get_location_trend,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{Router, routing::get};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Reference data
        .route("/api/v1/locations", get(get_locations))
        .route("/api/v1/seasons", get(get_seasons))
        // Ground truth
        .route(
            "/api/v1/locations/:code/timeseries",
            get(get_location_timeseries),
        )
        // Forecasts
        .route(
            "/api/v1/locations/:code/forecasts",
            get(get_location_forecasts),
        )
        .route(
            "/api/v1/locations/:code/forecasts/:model",
            get(get_model_forecast),
        )
        // Trend nowcasts
        .route("/api/v1/locations/:code/trends", get(get_location_trend))
        // Risk classification
        .route("/api/v1/locations/:code/risk", get(classify_location_risk))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
