use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::config::initialize_app_state;
use crate::loader::Loader;
use crate::router::create_router;

pub async fn serve(data_dir: &str, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("Fluscope application starting up");
    debug!("Data directory: {}", data_dir);
    debug!("Bind address: {}", bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let (state, remaining) = match initialize_app_state(data_dir) {
        Ok(initialized) => {
            debug!("Application state initialized successfully");
            initialized
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Backfill older seasons while the server is already answering queries.
    // Commits are additive, so a load finishing late is still valid data.
    if !remaining.is_empty() {
        let loader = Loader::new(data_dir);
        let data = state.data.clone();
        tokio::task::spawn_blocking(move || {
            for season_id in remaining {
                match loader.load_season_into(&data, &season_id) {
                    Ok(report) => debug!(
                        %season_id,
                        observations = report.observations,
                        predictions = report.predictions,
                        "background season load finished"
                    ),
                    Err(e) => warn!(%season_id, "background season load failed: {e}"),
                }
            }
        });
    }

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Fluscope API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
