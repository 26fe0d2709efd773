use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A paired prediction interval at a named confidence width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntervalBound {
    /// Confidence width label, e.g. "50" or "95".
    pub width: String,
    pub lower: f64,
    pub upper: f64,
}

/// One model's forecast for a single (reference date, target date, location).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// The week the forecast was issued for.
    pub reference_date: NaiveDate,
    /// The week the forecast predicts.
    pub target_date: NaiveDate,
    /// Whole weeks between reference and target; derived, never set freely.
    pub horizon: i32,
    /// Median (0.5 quantile) of the predicted admissions distribution.
    pub median: f64,
    /// Interval bounds, narrowest first.
    pub intervals: Vec<IntervalBound>,
}

impl PredictionRecord {
    /// The horizon implied by the record's own dates, when the gap is a whole
    /// number of weeks.
    pub fn derived_horizon(&self) -> Option<i32> {
        let days = (self.target_date - self.reference_date).num_days();
        if days % 7 != 0 {
            return None;
        }
        i32::try_from(days / 7).ok()
    }

    /// True when the stored horizon matches the date-derived one. Records
    /// failing this are dropped at load time.
    pub fn horizon_is_consistent(&self) -> bool {
        self.derived_horizon() == Some(self.horizon)
    }
}

/// A named temporal bucket of reference dates within one (season, model)
/// pair. Partitions exist to bound query-time scans and support incremental
/// loading; they carry no semantic meaning of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Partition {
    PreForecast,
    FullForecast,
    ForecastTail,
    PostForecast,
}

impl Partition {
    /// The partitions that can contain a queried reference date in practice,
    /// in the order lookups scan them.
    pub const DEFAULT_LOOKUP_ORDER: [Partition; 2] =
        [Partition::FullForecast, Partition::ForecastTail];

    /// All partitions in temporal order.
    pub const ALL: [Partition; 4] = [
        Partition::PreForecast,
        Partition::FullForecast,
        Partition::ForecastTail,
        Partition::PostForecast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::PreForecast => "pre-forecast",
            Partition::FullForecast => "full-forecast",
            Partition::ForecastTail => "forecast-tail",
            Partition::PostForecast => "post-forecast",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Partition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre-forecast" => Ok(Partition::PreForecast),
            "full-forecast" => Ok(Partition::FullForecast),
            "forecast-tail" => Ok(Partition::ForecastTail),
            "post-forecast" => Ok(Partition::PostForecast),
            other => Err(format!("unknown partition name: {other}")),
        }
    }
}
