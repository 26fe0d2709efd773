//! Reads the static published documents into the in-memory store.
//!
//! All I/O lives here: the resolver and classifier never touch the
//! filesystem. Malformed records are logged and dropped so a partial load
//! still serves; only a missing or unparseable reference document aborts.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use model::location::{Location, LocationRegistry};
use model::observation::ObservationValue;
use model::prediction::{IntervalBound, Partition, PredictionRecord};
use model::season::Season;
use model::threshold::RateThresholds;
use model::trend::NowcastTrend;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use compute::{SeasonIndex, TimeSeriesStore, finalize_season};

use crate::schemas::DashboardData;

// ----- document shapes (format-only contract; content owned externally) -----

/// Location reference row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationRow {
    code: String,
    abbreviation: String,
    name: String,
    population: u64,
}

/// One fixed season in the metadata document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeasonRow {
    season_id: String,
    display_label: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    ongoing: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeasonDocument {
    seasons: Vec<SeasonRow>,
}

/// Per-location threshold row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThresholdRow {
    medium: f64,
    high: f64,
    very_high: f64,
}

/// `{ locationCode -> thresholds }`.
type ThresholdDocument = BTreeMap<String, ThresholdRow>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundTruthCell {
    admissions: i64,
    weekly_rate: f64,
}

/// `{ referenceDate -> { locationCode -> cell } }`.
type GroundTruthDocument = BTreeMap<String, BTreeMap<String, GroundTruthCell>>;

#[derive(Debug, Deserialize)]
struct PredictionCell {
    horizon: i32,
    median: f64,
    /// Confidence width label -> [lower, upper].
    #[serde(default)]
    intervals: BTreeMap<String, [f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct LocationForecasts {
    predictions: BTreeMap<String, PredictionCell>,
}

/// `{ model -> { partition -> { referenceDate -> { location -> forecasts } } } }`.
type PredictionsDocument =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, LocationForecasts>>>>;

#[derive(Debug, Deserialize)]
struct TrendCell {
    decrease: f64,
    stable: f64,
    increase: f64,
}

/// `{ model -> { date -> { location -> trend } } }`.
type TrendsDocument = BTreeMap<String, BTreeMap<String, BTreeMap<String, TrendCell>>>;

/// Parsed but uncommitted documents for one season. Parsing happens outside
/// the store lock; committing takes it briefly.
#[derive(Debug, Default)]
pub struct SeasonDocuments {
    ground_truth: Option<GroundTruthDocument>,
    predictions: Option<PredictionsDocument>,
}

/// Counts for one commit, for logs and the check-data command.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadReport {
    pub observations: usize,
    pub predictions: usize,
    pub dropped: usize,
}

#[derive(Clone, Debug)]
pub struct Loader {
    data_dir: PathBuf,
}

impl Loader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.data_dir.join(name);
        let file = File::open(&path).with_context(|| format!("failed to open {path:?}"))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse {path:?}"))
    }

    fn read_optional_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        if !self.data_dir.join(name).exists() {
            debug!(%name, "document not present, skipping");
            return Ok(None);
        }
        self.read_json(name).map(Some)
    }

    /// Loads the reference documents: locations, season metadata,
    /// thresholds, and trend nowcasts. Season time series are loaded
    /// separately so the current season can be served before older ones
    /// finish loading.
    #[instrument(skip(self))]
    pub fn load_reference(&self) -> Result<DashboardData> {
        let location_rows: Vec<LocationRow> = self.read_json("locations.json")?;
        let mut locations = LocationRegistry::new();
        for row in location_rows {
            locations.insert(Location {
                code: row.code,
                abbreviation: row.abbreviation,
                name: row.name,
                population: row.population,
            });
        }
        info!(locations = locations.len(), "loaded location reference");

        let season_document: SeasonDocument = self.read_json("seasons.json")?;
        let seasons = SeasonIndex::new(
            season_document
                .seasons
                .into_iter()
                .map(|row| Season {
                    id: row.season_id,
                    display_label: row.display_label,
                    start: row.start_date,
                    end: row.end_date,
                    ongoing: row.ongoing,
                })
                .collect(),
        )
        .context("season metadata document is invalid")?;
        info!(seasons = seasons.seasons().len(), "loaded season metadata");

        let mut store = TimeSeriesStore::new();
        let thresholds: Option<ThresholdDocument> =
            self.read_optional_json("thresholds.json")?;
        for (location, row) in thresholds.unwrap_or_default() {
            let result = store.set_thresholds(
                &location,
                RateThresholds {
                    medium: row.medium,
                    high: row.high,
                    very_high: row.very_high,
                },
            );
            if let Err(error) = result {
                warn!(%error, "dropping threshold record");
            }
        }

        let trends: Option<TrendsDocument> = self.read_optional_json("nowcast_trends.json")?;
        for (model, by_date) in trends.unwrap_or_default() {
            for (date_key, by_location) in by_date {
                let Some(date) = parse_date(&date_key) else {
                    continue;
                };
                for (location, cell) in by_location {
                    let trend = NowcastTrend {
                        decrease: cell.decrease,
                        stable: cell.stable,
                        increase: cell.increase,
                    };
                    if !trend.is_plausible() {
                        warn!(%model, %date, %location, "dropping implausible trend record");
                        continue;
                    }
                    store.insert_trend(&model, date, &location, trend);
                }
            }
        }

        Ok(DashboardData {
            store,
            seasons,
            locations,
        })
    }

    /// Season ids in loading order: newest first, so the default view is
    /// ready before the backfill starts.
    pub fn season_ids(data: &DashboardData) -> Vec<String> {
        let mut ids: Vec<String> = data
            .seasons
            .seasons()
            .iter()
            .map(|season| season.id.clone())
            .collect();
        ids.reverse();
        ids
    }

    /// Parses one season's time-series documents. Pure I/O, no lock held.
    #[instrument(skip(self))]
    pub fn read_season_documents(&self, season_id: &str) -> Result<SeasonDocuments> {
        Ok(SeasonDocuments {
            ground_truth: self
                .read_optional_json(&format!("ground_truth_{season_id}.json"))?,
            predictions: self
                .read_optional_json(&format!("predictions_{season_id}.json"))?,
        })
    }

    /// Commits parsed documents and rebuilds the season's continuous axis.
    /// Inserts are additive and idempotent; a record that fails validation
    /// is logged and dropped rather than aborting the season.
    pub fn commit_season(
        data: &mut DashboardData,
        season_id: &str,
        documents: SeasonDocuments,
    ) -> LoadReport {
        let mut report = LoadReport::default();

        for (date_key, by_location) in documents.ground_truth.unwrap_or_default() {
            let Some(date) = parse_date(&date_key) else {
                report.dropped += 1;
                continue;
            };
            for (location, cell) in by_location {
                data.store.insert_ground_truth(
                    season_id,
                    date,
                    &location,
                    ObservationValue {
                        admissions: cell.admissions,
                        weekly_rate: cell.weekly_rate,
                    },
                );
                report.observations += 1;
            }
        }

        for (model, by_partition) in documents.predictions.unwrap_or_default() {
            for (partition_name, by_reference) in by_partition {
                let Ok(partition) = partition_name.parse::<Partition>() else {
                    warn!(%model, %partition_name, "dropping unknown partition");
                    report.dropped += 1;
                    continue;
                };
                for (reference_key, by_location) in by_reference {
                    let Some(reference_date) = parse_date(&reference_key) else {
                        report.dropped += 1;
                        continue;
                    };
                    for (location, forecasts) in by_location {
                        for (target_key, cell) in forecasts.predictions {
                            let Some(target_date) = parse_date(&target_key) else {
                                report.dropped += 1;
                                continue;
                            };
                            let record = PredictionRecord {
                                reference_date,
                                target_date,
                                horizon: cell.horizon,
                                median: cell.median,
                                intervals: intervals_from_document(&cell.intervals),
                            };
                            match data.store.insert_prediction(
                                season_id, &model, partition, &location, record,
                            ) {
                                Ok(()) => report.predictions += 1,
                                Err(error) => {
                                    warn!(%error, %model, %location, "dropping prediction record");
                                    report.dropped += 1;
                                }
                            }
                        }
                    }
                }
            }
        }

        finalize_season(&mut data.store, season_id, &data.locations);
        if let Some(latest) = data.store.latest_reference_date() {
            data.seasons.recompute_dynamic_periods(latest);
        }

        info!(
            %season_id,
            observations = report.observations,
            predictions = report.predictions,
            dropped = report.dropped,
            "committed season"
        );
        report
    }

    /// Reads and commits one season against the shared state. Parsing runs
    /// outside the write lock; the lock is held only for the commit.
    pub fn load_season_into(
        &self,
        data: &RwLock<DashboardData>,
        season_id: &str,
    ) -> Result<LoadReport> {
        let documents = self.read_season_documents(season_id)?;
        let mut guard = data
            .write()
            .map_err(|_| anyhow::anyhow!("dashboard data lock poisoned"))?;
        Ok(Self::commit_season(&mut guard, season_id, documents))
    }
}

fn parse_date(key: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(error) => {
            warn!(%key, %error, "dropping record with unparseable date key");
            None
        }
    }
}

/// Orders interval bounds narrowest first; widths are numeric labels like
/// "50" and "95" in practice, with a lexicographic fallback for anything
/// else.
fn intervals_from_document(intervals: &BTreeMap<String, [f64; 2]>) -> Vec<IntervalBound> {
    let mut bounds: Vec<IntervalBound> = intervals
        .iter()
        .map(|(width, &[lower, upper])| IntervalBound {
            width: width.clone(),
            lower,
            upper,
        })
        .collect();
    bounds.sort_by(|a, b| {
        match (a.width.parse::<u32>(), b.width.parse::<u32>()) {
            (Ok(a_width), Ok(b_width)) => a_width.cmp(&b_width),
            _ => a.width.cmp(&b.width),
        }
    });
    bounds
}
