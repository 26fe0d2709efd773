use chrono::NaiveDate;
use model::location::LocationRegistry;
use model::observation::ObservationPoint;
use model::prediction::Partition;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, instrument};

use crate::error::QueryError;
use crate::seasons::SeasonIndex;
use crate::store::{TargetSeries, TimeSeriesStore};

/// The public read API over the loaded data: range and point queries that
/// hide season and partition boundaries from callers.
///
/// Every method is a pure, synchronous read. Missing data yields empty or
/// `None` results; only malformed queries (backwards ranges, unknown
/// locations) are rejected with a [`QueryError`].
pub struct QueryResolver<'a> {
    store: &'a TimeSeriesStore,
    seasons: &'a SeasonIndex,
    locations: &'a LocationRegistry,
}

impl<'a> QueryResolver<'a> {
    pub fn new(
        store: &'a TimeSeriesStore,
        seasons: &'a SeasonIndex,
        locations: &'a LocationRegistry,
    ) -> Self {
        Self {
            store,
            seasons,
            locations,
        }
    }

    fn check_location(&self, location: &str) -> Result<(), QueryError> {
        if self.locations.contains(location) {
            Ok(())
        } else {
            Err(QueryError::UnknownLocation(location.to_string()))
        }
    }

    /// Ground truth for one location across `[start, end]`, spliced together
    /// from every overlapping season's continuous axis. Sorted ascending by
    /// date; where seasons hand back the same date the first (earlier
    /// season's) entry wins.
    #[instrument(skip(self), fields(%start, %end, location))]
    pub fn ground_truth_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        location: &str,
    ) -> Result<Vec<ObservationPoint>, QueryError> {
        if end < start {
            return Err(QueryError::InvalidDateRange { start, end });
        }
        self.check_location(location)?;

        let mut seen: HashSet<NaiveDate> = HashSet::new();
        let mut points = Vec::new();
        for season in self.seasons.resolve_overlapping(start, end) {
            for point in self.store.axis(season) {
                if point.location != location || point.date < start || point.date > end {
                    continue;
                }
                if seen.insert(point.date) {
                    points.push(point.clone());
                }
            }
        }
        points.sort_by_key(|point| point.date);
        debug!(points = points.len(), "resolved ground truth range");
        Ok(points)
    }

    /// Forecasts issued at exactly `reference_date` for each requested
    /// model, keeping only horizons up to `max_horizon`. Models with no
    /// matching entry are omitted entirely; an unknown season yields an
    /// empty map.
    #[instrument(skip(self, models), fields(models = models.len(), %reference_date, location))]
    pub fn predictions_for_models(
        &self,
        models: &[String],
        location: &str,
        reference_date: NaiveDate,
        max_horizon: i32,
    ) -> Result<HashMap<String, TargetSeries>, QueryError> {
        self.check_location(location)?;

        let Some(season) = self.seasons.resolve_for_date(reference_date) else {
            return Ok(HashMap::new());
        };

        let mut result = HashMap::new();
        for model in models {
            let Some(series) = self.store.predictions(
                season,
                model,
                &Partition::DEFAULT_LOOKUP_ORDER,
                reference_date,
                location,
            ) else {
                continue;
            };
            let filtered: TargetSeries = series
                .iter()
                .filter(|(_, record)| record.horizon <= max_horizon)
                .map(|(&target, record)| (target, record.clone()))
                .collect();
            if !filtered.is_empty() {
                result.insert(model.clone(), filtered);
            }
        }
        Ok(result)
    }

    /// Single-model variant used by the risk widgets. `None` when the
    /// season, model, or location has no data at the reference date.
    pub fn prediction_for_model_week(
        &self,
        model: &str,
        location: &str,
        reference_date: NaiveDate,
    ) -> Result<Option<TargetSeries>, QueryError> {
        self.check_location(location)?;

        let Some(season) = self.seasons.resolve_for_date(reference_date) else {
            return Ok(None);
        };
        Ok(self
            .store
            .predictions(
                season,
                model,
                &Partition::DEFAULT_LOOKUP_ORDER,
                reference_date,
                location,
            )
            .cloned())
    }

    /// The union of a location's ground-truth dates and a model's prediction
    /// target dates within a season, the candidate set for snapping.
    pub fn combined_dates(&self, season: &str, model: &str, location: &str) -> BTreeSet<NaiveDate> {
        let mut dates = BTreeSet::new();
        if let Some(series) = self.store.ground_truth_series(season) {
            for (&date, by_location) in series {
                if by_location.contains_key(location) {
                    dates.insert(date);
                }
            }
        }
        dates.extend(self.store.prediction_target_dates(season, model, location));
        dates
    }

    /// The candidate closest in absolute time to `query_date`.
    ///
    /// Tie policy: candidates are walked in ascending order and a candidate
    /// replaces the current best only when strictly closer, so two
    /// equidistant dates resolve to the earlier one, deterministically.
    pub fn snap_to_nearest_date<I>(&self, candidates: I, query_date: NaiveDate) -> Option<NaiveDate>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut best: Option<(NaiveDate, i64)> = None;
        for candidate in candidates {
            let distance = (candidate - query_date).num_days().abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((candidate, distance)),
            }
        }
        best.map(|(date, _)| date)
    }
}
