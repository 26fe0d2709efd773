use chrono::{Datelike, Duration, NaiveDate, Weekday};
use model::observation::{ObservationPoint, ObservationValue};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Week boundary of the published surveillance cadence. Ground truth and
/// forecasts are issued for Saturday-ending epidemiological weeks.
pub const WEEK_ANCHOR: Weekday = Weekday::Sat;

/// First anchored date on or after `date`.
fn snap_forward(date: NaiveDate) -> NaiveDate {
    let offset = (7 + WEEK_ANCHOR.num_days_from_sunday() - date.weekday().num_days_from_sunday())
        % 7;
    date + Duration::days(i64::from(offset))
}

/// Builds a season's continuous weekly date axis.
///
/// The output contains every real observation for the listed locations plus,
/// for every anchored week between the global earliest and latest date (over
/// ground truth and the season's prediction reference/target dates) and every
/// location, a placeholder entry where no real observation exists. Sorted
/// ascending by date, then by the order of `locations`.
///
/// This is a pure preprocessing step run once per season load; the store
/// caches its result so the query path never rebuilds it.
pub fn build_continuous_axis(
    observations: &BTreeMap<NaiveDate, HashMap<String, ObservationValue>>,
    prediction_bounds: Option<(NaiveDate, NaiveDate)>,
    locations: &[String],
) -> Vec<ObservationPoint> {
    let mut earliest = observations.keys().next().copied();
    let mut latest = observations.keys().next_back().copied();
    if let Some((lo, hi)) = prediction_bounds {
        earliest = Some(earliest.map_or(lo, |e| e.min(lo)));
        latest = Some(latest.map_or(hi, |l| l.max(hi)));
    }
    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return Vec::new();
    };

    let mut points = Vec::new();
    let mut seen: HashSet<(NaiveDate, &str)> = HashSet::new();
    for (&date, by_location) in observations {
        for location in locations {
            if let Some(&value) = by_location.get(location.as_str()) {
                points.push(ObservationPoint::new(date, location.clone(), value));
                seen.insert((date, location.as_str()));
            }
        }
    }

    let mut week = snap_forward(earliest);
    let mut synthesized = 0usize;
    while week <= latest {
        for location in locations {
            if !seen.contains(&(week, location.as_str())) {
                points.push(ObservationPoint::placeholder(week, location.clone()));
                synthesized += 1;
            }
        }
        week += Duration::weeks(1);
    }

    // Placeholders were appended after the real points; restore date order.
    // The sort is stable, so within a date the `locations` order holds.
    points.sort_by_key(|point| point.date);

    debug!(
        real = points.len() - synthesized,
        placeholders = synthesized,
        %earliest,
        %latest,
        "built continuous axis"
    );
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn value(admissions: i64) -> ObservationValue {
        ObservationValue {
            admissions,
            weekly_rate: admissions as f64 / 10.0,
        }
    }

    fn raw(
        entries: &[(NaiveDate, &str, i64)],
    ) -> BTreeMap<NaiveDate, HashMap<String, ObservationValue>> {
        let mut map: BTreeMap<NaiveDate, HashMap<String, ObservationValue>> = BTreeMap::new();
        for &(day, location, admissions) in entries {
            map.entry(day)
                .or_default()
                .insert(location.to_string(), value(admissions));
        }
        map
    }

    fn locations() -> Vec<String> {
        vec!["06".to_string(), "US".to_string()]
    }

    #[test]
    fn test_missing_weeks_get_placeholders() {
        // Saturdays 2024-11-02, -09, -16; the middle week is unpublished.
        let observations = raw(&[
            (date(2024, 11, 2), "06", 10),
            (date(2024, 11, 2), "US", 500),
            (date(2024, 11, 16), "06", 12),
            (date(2024, 11, 16), "US", 520),
        ]);

        let axis = build_continuous_axis(&observations, None, &locations());

        assert_eq!(axis.len(), 6);
        let middle: Vec<_> = axis
            .iter()
            .filter(|p| p.date == date(2024, 11, 9))
            .collect();
        assert_eq!(middle.len(), 2);
        assert!(middle.iter().all(|p| p.is_placeholder()));
    }

    #[test]
    fn test_axis_extends_to_prediction_bounds() {
        let observations = raw(&[(date(2024, 11, 2), "06", 10)]);
        let bounds = Some((date(2024, 11, 2), date(2024, 11, 23)));

        let axis = build_continuous_axis(&observations, bounds, &locations());

        // Four Saturdays, two locations; only one real observation.
        assert_eq!(axis.len(), 8);
        assert_eq!(axis.iter().filter(|p| !p.is_placeholder()).count(), 1);
        assert_eq!(axis.last().unwrap().date, date(2024, 11, 23));
    }

    #[test]
    fn test_axis_dates_are_weekly_and_sorted() {
        let observations = raw(&[
            (date(2024, 11, 2), "06", 10),
            (date(2024, 12, 14), "06", 20),
        ]);

        let axis = build_continuous_axis(&observations, None, &locations());

        let mut dates: Vec<NaiveDate> = axis.iter().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        dates.dedup();
        assert!(
            dates
                .windows(2)
                .all(|w| (w[1] - w[0]) == Duration::weeks(1))
        );
    }

    #[test]
    fn test_axis_is_idempotent() {
        let observations = raw(&[
            (date(2024, 11, 2), "06", 10),
            (date(2024, 11, 30), "US", 480),
        ]);

        let first = build_continuous_axis(&observations, None, &locations());
        let second = build_continuous_axis(&observations, None, &locations());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_empty_axis() {
        let observations = BTreeMap::new();
        let axis = build_continuous_axis(&observations, None, &locations());
        assert!(axis.is_empty());
    }

    #[test]
    fn test_placeholders_never_enter_aggregates() {
        let observations = raw(&[
            (date(2024, 11, 2), "06", 10),
            (date(2024, 11, 16), "06", 14),
        ]);
        let axis = build_continuous_axis(&observations, None, &vec!["06".to_string()]);

        // Downstream aggregation must skip placeholders, not count them as
        // zeros; filtering by the sentinel gives the real total.
        let total: i64 = axis
            .iter()
            .filter(|p| !p.is_placeholder())
            .map(|p| p.admissions)
            .sum();
        assert_eq!(total, 24);
    }
}
