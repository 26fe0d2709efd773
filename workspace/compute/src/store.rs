use chrono::NaiveDate;
use model::observation::{ObservationPoint, ObservationValue};
use model::prediction::{Partition, PredictionRecord};
use model::threshold::RateThresholds;
use model::trend::NowcastTrend;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

use crate::error::LoadError;

/// Forecasts for one reference date and location: target date to record.
pub type TargetSeries = BTreeMap<NaiveDate, PredictionRecord>;

/// One partition's records, keyed by reference date then location.
#[derive(Clone, Debug, Default)]
struct PartitionData {
    /// Span of reference dates held, maintained to check disjointness.
    span: Option<(NaiveDate, NaiveDate)>,
    by_reference: BTreeMap<NaiveDate, HashMap<String, TargetSeries>>,
}

impl PartitionData {
    fn span_with(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self.span {
            Some((lo, hi)) => (lo.min(date), hi.max(date)),
            None => (date, date),
        }
    }
}

/// One model's partitions within a season.
#[derive(Clone, Debug, Default)]
struct ModelData {
    partitions: HashMap<Partition, PartitionData>,
}

/// Everything loaded for one season.
#[derive(Clone, Debug, Default)]
struct SeasonData {
    ground_truth: BTreeMap<NaiveDate, HashMap<String, ObservationValue>>,
    models: HashMap<String, ModelData>,
    /// Continuous weekly axis with placeholders, built once after loading.
    axis: Vec<ObservationPoint>,
}

/// In-memory store of observations, predictions, and trend nowcasts,
/// organized by season and, within a (season, model), by partition.
///
/// The store is populated additively by the loader and read-only from the
/// resolver's perspective afterwards: inserts are idempotent upserts on the
/// full key and never rewrite a published record except under the same key.
#[derive(Clone, Debug, Default)]
pub struct TimeSeriesStore {
    seasons: HashMap<String, SeasonData>,
    /// model -> date -> location -> trend.
    trends: HashMap<String, BTreeMap<NaiveDate, HashMap<String, NowcastTrend>>>,
    thresholds: HashMap<String, RateThresholds>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- inserts (loader only) -----

    pub fn insert_ground_truth(
        &mut self,
        season: &str,
        date: NaiveDate,
        location: &str,
        value: ObservationValue,
    ) {
        self.seasons
            .entry(season.to_string())
            .or_default()
            .ground_truth
            .entry(date)
            .or_default()
            .insert(location.to_string(), value);
    }

    /// Inserts one prediction record. Rejected when the record's horizon is
    /// inconsistent with its dates, or when accepting it would make this
    /// partition's reference-date span overlap a sibling partition's.
    pub fn insert_prediction(
        &mut self,
        season: &str,
        model: &str,
        partition: Partition,
        location: &str,
        record: PredictionRecord,
    ) -> Result<(), LoadError> {
        if !record.horizon_is_consistent() {
            return Err(LoadError::InconsistentHorizon {
                reference_date: record.reference_date,
                target_date: record.target_date,
                horizon: record.horizon,
            });
        }

        let model_data = self
            .seasons
            .entry(season.to_string())
            .or_default()
            .models
            .entry(model.to_string())
            .or_default();

        let candidate = model_data
            .partitions
            .get(&partition)
            .map(|p| p.span_with(record.reference_date))
            .unwrap_or((record.reference_date, record.reference_date));
        for (&other, data) in &model_data.partitions {
            if other == partition {
                continue;
            }
            if let Some((lo, hi)) = data.span {
                if !(candidate.1 < lo || candidate.0 > hi) {
                    return Err(LoadError::OverlappingPartitions {
                        season: season.to_string(),
                        model: model.to_string(),
                        partition,
                        other,
                    });
                }
            }
        }

        let partition_data = model_data.partitions.entry(partition).or_default();
        partition_data.span = Some(partition_data.span_with(record.reference_date));
        partition_data
            .by_reference
            .entry(record.reference_date)
            .or_default()
            .entry(location.to_string())
            .or_default()
            .insert(record.target_date, record);
        Ok(())
    }

    pub fn insert_trend(
        &mut self,
        model: &str,
        date: NaiveDate,
        location: &str,
        trend: NowcastTrend,
    ) {
        self.trends
            .entry(model.to_string())
            .or_default()
            .entry(date)
            .or_default()
            .insert(location.to_string(), trend);
    }

    pub fn set_thresholds(
        &mut self,
        location: &str,
        thresholds: RateThresholds,
    ) -> Result<(), LoadError> {
        if !thresholds.is_strictly_increasing() {
            return Err(LoadError::NonMonotonicThresholds {
                location: location.to_string(),
            });
        }
        self.thresholds.insert(location.to_string(), thresholds);
        Ok(())
    }

    /// Caches the season's continuous axis; called once after the season's
    /// documents are committed, never on the query path.
    #[instrument(skip(self, axis), fields(points = axis.len()))]
    pub fn set_axis(&mut self, season: &str, axis: Vec<ObservationPoint>) {
        debug!(%season, "caching continuous axis");
        self.seasons.entry(season.to_string()).or_default().axis = axis;
    }

    // ----- reads -----

    pub fn ground_truth(
        &self,
        season: &str,
        date: NaiveDate,
        location: &str,
    ) -> Option<&ObservationValue> {
        self.seasons
            .get(season)?
            .ground_truth
            .get(&date)?
            .get(location)
    }

    /// Raw ground truth for a season, keyed by date then location.
    pub fn ground_truth_series(
        &self,
        season: &str,
    ) -> Option<&BTreeMap<NaiveDate, HashMap<String, ObservationValue>>> {
        self.seasons.get(season).map(|s| &s.ground_truth)
    }

    /// Forecasts at an exact reference date, scanning `partition_order` and
    /// returning the first partition that has the key. Records for the same
    /// key are never merged across partitions.
    pub fn predictions(
        &self,
        season: &str,
        model: &str,
        partition_order: &[Partition],
        reference_date: NaiveDate,
        location: &str,
    ) -> Option<&TargetSeries> {
        let model_data = self.seasons.get(season)?.models.get(model)?;
        partition_order.iter().find_map(|partition| {
            model_data
                .partitions
                .get(partition)?
                .by_reference
                .get(&reference_date)?
                .get(location)
        })
    }

    pub fn trend(&self, model: &str, date: NaiveDate, location: &str) -> Option<&NowcastTrend> {
        self.trends.get(model)?.get(&date)?.get(location)
    }

    pub fn thresholds(&self, location: &str) -> Option<&RateThresholds> {
        self.thresholds.get(location)
    }

    /// The season's continuous axis; empty until `set_axis` has run.
    pub fn axis(&self, season: &str) -> &[ObservationPoint] {
        self.seasons
            .get(season)
            .map(|s| s.axis.as_slice())
            .unwrap_or(&[])
    }

    /// Earliest and latest date touched by the season's predictions, over
    /// both reference and target dates. Feeds the gap-filler's bounds.
    pub fn prediction_date_bounds(&self, season: &str) -> Option<(NaiveDate, NaiveDate)> {
        let season_data = self.seasons.get(season)?;
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        let mut extend = |date: NaiveDate| {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
                None => (date, date),
            });
        };
        for model in season_data.models.values() {
            for partition in model.partitions.values() {
                for (&reference, by_location) in &partition.by_reference {
                    extend(reference);
                    for series in by_location.values() {
                        for &target in series.keys() {
                            extend(target);
                        }
                    }
                }
            }
        }
        bounds
    }

    /// Every target date a model predicts for a location within a season,
    /// across all partitions, deduplicated and sorted.
    pub fn prediction_target_dates(
        &self,
        season: &str,
        model: &str,
        location: &str,
    ) -> Vec<NaiveDate> {
        let Some(model_data) = self.seasons.get(season).and_then(|s| s.models.get(model)) else {
            return Vec::new();
        };
        let mut dates: Vec<NaiveDate> = model_data
            .partitions
            .values()
            .flat_map(|partition| partition.by_reference.values())
            .filter_map(|by_location| by_location.get(location))
            .flat_map(|series| series.keys().copied())
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// The latest reference date across every season and model, used to
    /// anchor the dynamic periods.
    pub fn latest_reference_date(&self) -> Option<NaiveDate> {
        self.seasons
            .values()
            .flat_map(|season| season.models.values())
            .flat_map(|model| model.partitions.values())
            .filter_map(|partition| partition.span.map(|(_, hi)| hi))
            .max()
    }

    /// Model names with data in a season, sorted for stable output.
    pub fn models(&self, season: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .seasons
            .get(season)
            .map(|s| s.models.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn has_season(&self, season: &str) -> bool {
        self.seasons.contains_key(season)
    }
}
