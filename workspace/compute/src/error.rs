use chrono::NaiveDate;
use model::prediction::Partition;
use thiserror::Error;

/// Rejection of a malformed query. Missing data is never an error; resolver
/// methods return empty or `None` results for keys with no data, and reserve
/// these variants for requests that could never be answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The requested range runs backwards.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// The location code is not in the reference data.
    #[error("unknown location code: {0}")]
    UnknownLocation(String),
}

/// Rejection of a single record at load time. The loader logs these and
/// drops the offending record; a partial load is preferable to none.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The record's stated horizon does not match its own dates.
    #[error(
        "horizon {horizon} inconsistent with reference {reference_date} and target {target_date}"
    )]
    InconsistentHorizon {
        reference_date: NaiveDate,
        target_date: NaiveDate,
        horizon: i32,
    },

    /// Thresholds must satisfy 0 < medium < high < veryHigh.
    #[error("thresholds for location {location} are not strictly increasing")]
    NonMonotonicThresholds { location: String },

    /// Accepting the record would make two partitions of the same
    /// (season, model) cover overlapping reference-date ranges.
    #[error(
        "partition {partition} would overlap {other} for model {model} in season {season}"
    )]
    OverlappingPartitions {
        season: String,
        model: String,
        partition: Partition,
        other: Partition,
    },

    /// Two fixed seasons cover the same date.
    #[error("season {second} overlaps season {first}")]
    OverlappingSeasons { first: String, second: String },
}

/// Type alias for Result with QueryError
pub type Result<T, E = QueryError> = std::result::Result<T, E>;
