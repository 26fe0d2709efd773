use anyhow::Result;
use tracing::{info, warn};

use crate::loader::Loader;

/// Runs the full load without serving, so document problems surface before
/// deployment. Every record the loader would drop is logged by the loader
/// itself; this command adds the per-season totals.
pub fn check_data(data_dir: &str) -> Result<()> {
    info!("Validating data documents in {}", data_dir);

    let loader = Loader::new(data_dir);
    let mut data = loader.load_reference()?;

    let mut total_dropped = 0usize;
    for season_id in Loader::season_ids(&data) {
        let documents = loader.read_season_documents(&season_id)?;
        let report = Loader::commit_season(&mut data, &season_id, documents);
        info!(
            %season_id,
            observations = report.observations,
            predictions = report.predictions,
            dropped = report.dropped,
            "season validated"
        );
        total_dropped += report.dropped;
    }

    if total_dropped > 0 {
        warn!("{total_dropped} records would be dropped at load time");
    } else {
        info!("All records valid");
    }
    Ok(())
}
