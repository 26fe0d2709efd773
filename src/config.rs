use anyhow::Result;
use moka::future::Cache;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::info;

use crate::loader::Loader;
use crate::schemas::AppState;

/// Initialize application state: load the reference documents and the most
/// recent season synchronously so the default view is servable, and return
/// the ids of the remaining seasons for background loading.
pub fn initialize_app_state(data_dir: &str) -> Result<(AppState, Vec<String>)> {
    dotenvy::dotenv().ok();

    let loader = Loader::new(data_dir);
    let mut data = loader.load_reference()?;

    let mut remaining = Loader::season_ids(&data);
    if let Some(current) = remaining.first().cloned() {
        let documents = loader.read_season_documents(&current)?;
        Loader::commit_season(&mut data, &current, documents);
        remaining.remove(0);
    }
    info!(backfill = remaining.len(), "initial season committed");

    // Response cache; entries expire well before a session reload would.
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    let state = AppState {
        data: Arc::new(RwLock::new(data)),
        cache,
    };
    Ok((state, remaining))
}
