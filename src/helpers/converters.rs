//! Converters from compute output to the transport DTOs in `common`.

use chrono::NaiveDate;
use common::{ForecastResponse, GroundTruthTimeseries, IntervalDto, ModelForecast, ObservationDto, PredictionDto};
use compute::TargetSeries;
use model::observation::ObservationPoint;
use model::prediction::PredictionRecord;
use std::collections::HashMap;

/// Converts resolver range-query output into the wire shape. Placeholder
/// sentinels become `null` values so clients never sum them as zeros.
pub fn points_to_timeseries(
    location: &str,
    points: Vec<ObservationPoint>,
) -> GroundTruthTimeseries {
    let dtos = points
        .into_iter()
        .map(|point| {
            if point.is_placeholder() {
                ObservationDto {
                    date: point.date,
                    admissions: None,
                    weekly_rate: None,
                }
            } else {
                ObservationDto {
                    date: point.date,
                    admissions: Some(point.admissions),
                    weekly_rate: Some(point.weekly_rate),
                }
            }
        })
        .collect();
    GroundTruthTimeseries::new(location, dtos)
}

pub fn record_to_dto(record: &PredictionRecord) -> PredictionDto {
    PredictionDto {
        target_date: record.target_date,
        horizon: record.horizon,
        median: record.median,
        intervals: record
            .intervals
            .iter()
            .map(|bound| IntervalDto {
                width: bound.width.clone(),
                lower: bound.lower,
                upper: bound.upper,
            })
            .collect(),
    }
}

/// Target-date map to DTO list; the map is ordered, so the list comes out
/// ascending by target date.
pub fn series_to_dtos(series: &TargetSeries) -> Vec<PredictionDto> {
    series.values().map(record_to_dto).collect()
}

/// Multi-model resolver output to the wire shape, models sorted by name for
/// stable responses.
pub fn forecasts_to_response(
    location: &str,
    reference_date: NaiveDate,
    forecasts: HashMap<String, TargetSeries>,
) -> ForecastResponse {
    let mut models: Vec<ModelForecast> = forecasts
        .into_iter()
        .map(|(model, series)| ModelForecast {
            model,
            predictions: series_to_dtos(&series),
        })
        .collect();
    models.sort_by(|a, b| a.model.cmp(&b.model));
    ForecastResponse {
        location: location.to_string(),
        reference_date,
        models,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_points_become_nulls() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let points = vec![
            ObservationPoint {
                date,
                location: "06".to_string(),
                admissions: 12,
                weekly_rate: 0.4,
            },
            ObservationPoint::placeholder(date + chrono::Duration::weeks(1), "06"),
        ];

        let series = points_to_timeseries("06", points);

        assert_eq!(series.points[0].admissions, Some(12));
        assert!(series.points[1].is_placeholder());
        assert_eq!(series.points[1].weekly_rate, None);
    }

    #[test]
    fn test_forecast_models_sorted_by_name() {
        let reference = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let record = PredictionRecord {
            reference_date: reference,
            target_date: reference,
            horizon: 0,
            median: 50.0,
            intervals: vec![],
        };
        let mut forecasts: HashMap<String, TargetSeries> = HashMap::new();
        for model in ["M2", "M1"] {
            let mut series = TargetSeries::new();
            series.insert(reference, record.clone());
            forecasts.insert(model.to_string(), series);
        }

        let response = forecasts_to_response("06", reference, forecasts);
        let names: Vec<&str> = response.models.iter().map(|m| m.model.as_str()).collect();
        assert_eq!(names, vec!["M1", "M2"]);
    }
}
