use chrono::{Duration, NaiveDate};
use model::season::{DynamicPeriod, Season};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::LoadError;

/// How far past its nominal end an ongoing season still claims dates.
/// Fresh data published between a season's end and the next season's
/// document appearing is shown under the ongoing season.
const ONGOING_GRACE: Duration = Duration::weeks(4);

/// Directory of named date intervals: the fixed season list plus the rolling
/// dynamic periods. Its single job is resolving dates and date ranges to the
/// season identifiers that contain them.
#[derive(Clone, Debug, Default)]
pub struct SeasonIndex {
    /// Fixed seasons, ordered by start date, non-overlapping.
    fixed: Vec<Season>,
    /// Dynamic periods by name; boundaries recomputed each load.
    dynamic: HashMap<String, DynamicPeriod>,
}

impl SeasonIndex {
    /// Builds the index from the season metadata document. Seasons are
    /// sorted by start date; an overlapping pair is rejected since overlap
    /// would make first-match resolution order-dependent.
    pub fn new(mut seasons: Vec<Season>) -> Result<Self, LoadError> {
        seasons.sort_by_key(|s| s.start);
        for pair in seasons.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(LoadError::OverlappingSeasons {
                    first: pair[0].id.clone(),
                    second: pair[1].id.clone(),
                });
            }
            if pair[1].start > pair[0].end + Duration::days(1) {
                // A hole in the calendar is legal but worth knowing about.
                warn!(
                    after = %pair[0].id,
                    before = %pair[1].id,
                    "gap between consecutive seasons"
                );
            }
        }
        Ok(Self {
            fixed: seasons,
            dynamic: HashMap::new(),
        })
    }

    /// The season containing `date`, if any. Linear scan, first match wins.
    /// An ongoing final season also claims dates shortly past its end.
    pub fn resolve_for_date(&self, date: NaiveDate) -> Option<&str> {
        for season in &self.fixed {
            if season.contains(date) {
                return Some(&season.id);
            }
            if season.ongoing && date > season.end && date <= season.end + ONGOING_GRACE {
                return Some(&season.id);
            }
        }
        None
    }

    /// Every season whose interval intersects `[start, end]`, in
    /// chronological order. Empty when nothing overlaps; never an error.
    pub fn resolve_overlapping(&self, start: NaiveDate, end: NaiveDate) -> Vec<&str> {
        self.fixed
            .iter()
            .filter(|season| season.overlaps(start, end))
            .map(|season| season.id.as_str())
            .collect()
    }

    /// Dynamic periods are looked up by name only; their boundaries move
    /// with every load, so date containment would be meaningless.
    pub fn dynamic_period(&self, name: &str) -> Option<&DynamicPeriod> {
        self.dynamic.get(name)
    }

    /// Recomputes the rolling windows relative to the latest reference date
    /// seen in this load.
    pub fn recompute_dynamic_periods(&mut self, latest: NaiveDate) {
        debug!(%latest, "recomputing dynamic periods");
        self.dynamic.clear();
        for weeks in [2u32, 4, 8] {
            let period = DynamicPeriod::ending_at(format!("last-{weeks}-weeks"), weeks, latest);
            self.dynamic.insert(period.name.clone(), period);
        }
    }

    /// Fixed seasons in chronological order.
    pub fn seasons(&self) -> &[Season] {
        &self.fixed
    }

    pub fn dynamic_periods(&self) -> impl Iterator<Item = &DynamicPeriod> {
        self.dynamic.values()
    }
}
