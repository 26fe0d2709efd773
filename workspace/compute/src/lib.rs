pub mod axis;
pub mod error;
pub mod resolver;
pub mod risk;
pub mod seasons;
pub mod store;

pub use error::{LoadError, QueryError};
pub use resolver::QueryResolver;
pub use risk::{BandLayout, RiskAssessment, RiskLevel, classify};
pub use seasons::SeasonIndex;
pub use store::{TargetSeries, TimeSeriesStore};

use model::location::LocationRegistry;
use model::observation::ObservationPoint;

/// Rebuilds a season's continuous axis from the store's raw contents and
/// caches it. Called once after a season's documents are committed; this is
/// the only preprocessing step between loading and serving queries.
pub fn finalize_season(store: &mut TimeSeriesStore, season: &str, locations: &LocationRegistry) {
    let observations = store
        .ground_truth_series(season)
        .cloned()
        .unwrap_or_default();
    let axis: Vec<ObservationPoint> = axis::build_continuous_axis(
        &observations,
        store.prediction_date_bounds(season),
        &locations.codes(),
    );
    store.set_axis(season, axis);
}
