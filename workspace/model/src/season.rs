use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named calendar interval bounding one batch of observation and forecast
/// data, roughly Aug 1 through Jul 31 of the following year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Unique season key, e.g. "2024-2025".
    pub id: String,
    /// Label shown in season pickers, e.g. "2024-25 Season".
    pub display_label: String,
    /// First date of the season (inclusive).
    pub start: NaiveDate,
    /// Last date of the season (inclusive).
    pub end: NaiveDate,
    /// The most recent season may keep receiving data past its nominal end.
    pub ongoing: bool,
}

impl Season {
    /// Closed-interval containment test.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when `[start, end]` intersects this season's interval.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        !(end < self.start || start > self.end)
    }
}

/// A rolling season-like window ("last 4 weeks") recomputed from the latest
/// available reference date at load time. Resolved by name, never by date
/// containment, since its boundaries move with every load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicPeriod {
    /// Stable period key, e.g. "last-4-weeks".
    pub name: String,
    /// Window length in weeks.
    pub weeks: u32,
    /// First date of the window (inclusive).
    pub start: NaiveDate,
    /// Last date of the window (inclusive), the latest reference date.
    pub end: NaiveDate,
}

impl DynamicPeriod {
    /// Builds the window ending at `latest` and spanning `weeks` weeks.
    pub fn ending_at(name: impl Into<String>, weeks: u32, latest: NaiveDate) -> Self {
        Self {
            name: name.into(),
            weeks,
            start: latest - chrono::Duration::weeks(i64::from(weeks)),
            end: latest,
        }
    }
}
