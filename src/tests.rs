#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{date, setup_test_app};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{
        ApiResponse, ForecastResponse, GroundTruthTimeseries, LocationDto, ModelForecast,
        RiskDto, SeasonListing, TrendDto,
    };

    #[tokio::test]
    async fn test_health_check() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Send GET request to health endpoint
        let response = server.get("/health").await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.locations, 2);
        assert_eq!(body.seasons, 2);
    }

    #[tokio::test]
    async fn test_get_locations() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/locations").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<LocationDto>> = response.json();
        assert!(body.success);
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0].code, "06");
        assert_eq!(body.data[0].abbreviation, "CA");
    }

    #[tokio::test]
    async fn test_get_seasons_includes_dynamic_periods() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/seasons").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<SeasonListing> = response.json();
        assert!(body.success);
        assert_eq!(body.data.seasons.len(), 2);
        assert!(body.data.seasons[1].ongoing);

        // Dynamic periods are anchored to the latest reference date.
        let windows: Vec<u32> = body.data.dynamic_periods.iter().map(|p| p.weeks).collect();
        assert_eq!(windows, vec![2, 4, 8]);
        assert!(
            body.data
                .dynamic_periods
                .iter()
                .all(|p| p.end == date(2024, 11, 2))
        );
    }

    #[tokio::test]
    async fn test_get_timeseries_fills_gap_weeks() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/06/timeseries?start_date=2024-10-01&end_date=2024-11-30")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<GroundTruthTimeseries> = response.json();
        assert!(body.success);
        let points = &body.data.points;

        // Sorted ascending with no duplicate dates.
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));

        // The unpublished week is present as a null placeholder.
        let gap = points.iter().find(|p| p.date == date(2024, 11, 9)).unwrap();
        assert!(gap.is_placeholder());
        assert_eq!(gap.admissions, None);

        let real = points.iter().find(|p| p.date == date(2024, 11, 2)).unwrap();
        assert_eq!(real.admissions, Some(12));
    }

    #[tokio::test]
    async fn test_get_timeseries_rejects_backwards_range() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/06/timeseries?start_date=2024-11-30&end_date=2024-10-01")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_get_timeseries_unknown_location() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/99/timeseries?start_date=2024-10-01&end_date=2024-11-30")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "UNKNOWN_LOCATION");
    }

    #[tokio::test]
    async fn test_get_forecasts_applies_horizon_filter() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/06/forecasts?reference_date=2024-11-02&models=FluCast-Ens,StatHub&horizon=1")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ForecastResponse> = response.json();
        assert!(body.success);

        // StatHub only has a horizon-2 record, so it is omitted entirely.
        assert_eq!(body.data.models.len(), 1);
        let flucast = &body.data.models[0];
        assert_eq!(flucast.model, "FluCast-Ens");
        assert_eq!(flucast.predictions.len(), 2); // horizons 0 and 1
        assert!(flucast.predictions.iter().all(|p| p.horizon <= 1));
    }

    #[tokio::test]
    async fn test_get_forecasts_defaults_to_all_models() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/06/forecasts?reference_date=2024-11-02")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ForecastResponse> = response.json();
        assert_eq!(body.data.models.len(), 2);
        // Sorted by model name for stable output.
        assert_eq!(body.data.models[0].model, "FluCast-Ens");
        assert_eq!(body.data.models[1].model, "StatHub");
    }

    #[tokio::test]
    async fn test_get_forecasts_empty_when_no_season() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // A reference date no season contains: nothing to show, not an error.
        let response = server
            .get("/api/v1/locations/06/forecasts?reference_date=2020-01-04")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ForecastResponse> = response.json();
        assert!(body.success);
        assert!(body.data.models.is_empty());
    }

    #[tokio::test]
    async fn test_get_model_forecast_returns_null_when_absent() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/06/forecasts/NoSuchModel?reference_date=2024-11-02")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Option<ModelForecast>> = response.json();
        assert!(body.success);
        assert!(body.data.is_none());
    }

    #[tokio::test]
    async fn test_get_model_forecast_with_snap() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // 2024-11-05 is not a data date; snapping lands on 2024-11-02.
        let response = server
            .get("/api/v1/locations/06/forecasts/FluCast-Ens?reference_date=2024-11-05&snap=true")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Option<ModelForecast>> = response.json();
        let forecast = body.data.expect("snapped forecast present");
        assert_eq!(forecast.predictions.len(), 4);

        // Without snapping the same query finds nothing.
        let exact = server
            .get("/api/v1/locations/06/forecasts/FluCast-Ens?reference_date=2024-11-05")
            .await;
        let exact_body: ApiResponse<Option<ModelForecast>> = exact.json();
        assert!(exact_body.data.is_none());
    }

    #[tokio::test]
    async fn test_get_trend() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/06/trends?model=FluCast-Ens&date=2024-11-02")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Option<TrendDto>> = response.json();
        let trend = body.data.expect("trend present");
        assert_eq!(trend.increase, 0.6);

        // A date with no nowcast is null data, not an error.
        let miss = server
            .get("/api/v1/locations/06/trends?model=FluCast-Ens&date=2024-12-07")
            .await;
        miss.assert_status(StatusCode::OK);
        let miss_body: ApiResponse<Option<TrendDto>> = miss.json();
        assert!(miss_body.data.is_none());
    }

    #[tokio::test]
    async fn test_classify_risk_low_band() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations/06/risk?value=50&bands=3")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<RiskDto> = response.json();
        assert_eq!(body.data.level, "Low");
        let position = body.data.position.unwrap();
        assert!((position - 0.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_classify_risk_zero_is_no_data() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/locations/06/risk?value=0").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<RiskDto> = response.json();
        assert_eq!(body.data.level, "No Data");
        assert!(body.data.position.is_none());
    }

    #[tokio::test]
    async fn test_classify_risk_without_thresholds_is_no_data() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // The US fixture has no threshold document entry.
        let response = server.get("/api/v1/locations/US/risk?value=250").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<RiskDto> = response.json();
        assert_eq!(body.data.level, "No Data");
    }

    #[tokio::test]
    async fn test_classify_risk_rejects_bad_band_count() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/locations/06/risk?value=50&bands=7").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_BANDS");
    }
}
