#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::{AppState, DashboardData};
    use axum::Router;
    use chrono::NaiveDate;
    use compute::{SeasonIndex, TimeSeriesStore, finalize_season};
    use model::location::{Location, LocationRegistry};
    use model::observation::ObservationValue;
    use model::prediction::{IntervalBound, Partition, PredictionRecord};
    use model::season::Season;
    use model::threshold::RateThresholds;
    use model::trend::NowcastTrend;
    use moka::future::Cache;
    use std::sync::{Arc, RwLock};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture_locations() -> LocationRegistry {
        let mut registry = LocationRegistry::new();
        registry.insert(Location {
            code: "06".to_string(),
            abbreviation: "CA".to_string(),
            name: "California".to_string(),
            population: 39_512_223,
        });
        registry.insert(Location {
            code: "US".to_string(),
            abbreviation: "US".to_string(),
            name: "United States".to_string(),
            population: 331_893_745,
        });
        registry
    }

    fn fixture_seasons() -> SeasonIndex {
        SeasonIndex::new(vec![
            Season {
                id: "2023-2024".to_string(),
                display_label: "2023-24 Season".to_string(),
                start: date(2023, 8, 1),
                end: date(2024, 7, 31),
                ongoing: false,
            },
            Season {
                id: "2024-2025".to_string(),
                display_label: "2024-25 Season".to_string(),
                start: date(2024, 8, 1),
                end: date(2025, 7, 31),
                ongoing: true,
            },
        ])
        .expect("fixture seasons are valid")
    }

    fn prediction(reference: NaiveDate, horizon: i32, median: f64) -> PredictionRecord {
        PredictionRecord {
            reference_date: reference,
            target_date: reference + chrono::Duration::weeks(i64::from(horizon)),
            horizon,
            median,
            intervals: vec![
                IntervalBound {
                    width: "50".to_string(),
                    lower: median * 0.8,
                    upper: median * 1.2,
                },
                IntervalBound {
                    width: "95".to_string(),
                    lower: median * 0.5,
                    upper: median * 1.5,
                },
            ],
        }
    }

    /// Builds the fixture store: three observed weeks with a gap, two
    /// models forecasting from 2024-11-02, one trend nowcast, and
    /// thresholds for California.
    fn fixture_store(seasons: &mut SeasonIndex, locations: &LocationRegistry) -> TimeSeriesStore {
        let mut store = TimeSeriesStore::new();
        let season = "2024-2025";
        let reference = date(2024, 11, 2);

        for (day, admissions) in [
            (date(2024, 10, 26), 10),
            (date(2024, 11, 2), 12),
            // 2024-11-09 intentionally unpublished
            (date(2024, 11, 16), 15),
        ] {
            for code in ["06", "US"] {
                store.insert_ground_truth(
                    season,
                    day,
                    code,
                    ObservationValue {
                        admissions,
                        weekly_rate: admissions as f64 / 10.0,
                    },
                );
            }
        }

        for horizon in 0..=3 {
            store
                .insert_prediction(
                    season,
                    "FluCast-Ens",
                    Partition::FullForecast,
                    "06",
                    prediction(reference, horizon, 100.0 + f64::from(horizon) * 10.0),
                )
                .expect("fixture prediction is valid");
        }
        // StatHub only publishes a two-week-out forecast, so horizon
        // filters below 2 drop it entirely.
        store
            .insert_prediction(
                season,
                "StatHub",
                Partition::FullForecast,
                "06",
                prediction(reference, 2, 95.0),
            )
            .expect("fixture prediction is valid");

        store.insert_trend(
            "FluCast-Ens",
            reference,
            "06",
            NowcastTrend {
                decrease: 0.1,
                stable: 0.3,
                increase: 0.6,
            },
        );

        store
            .set_thresholds(
                "06",
                RateThresholds {
                    medium: 100.0,
                    high: 300.0,
                    very_high: 500.0,
                },
            )
            .expect("fixture thresholds are valid");

        finalize_season(&mut store, season, locations);
        if let Some(latest) = store.latest_reference_date() {
            seasons.recompute_dynamic_periods(latest);
        }
        store
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        let locations = fixture_locations();
        let mut seasons = fixture_seasons();
        let store = fixture_store(&mut seasons, &locations);

        let cache = Cache::new(100);

        AppState {
            data: Arc::new(RwLock::new(DashboardData {
                store,
                seasons,
                locations,
            })),
            cache,
        }
    }

    /// Create a test application with the fixture state
    pub fn setup_test_app() -> Router {
        create_router(setup_test_app_state())
    }
}
