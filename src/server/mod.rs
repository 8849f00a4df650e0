//! Server startup and run loop

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::EventHubResult;
use crate::store::EventStore;

/// Open the store, reseed regions and build the shared state
pub fn startup(config: &Config) -> EventHubResult<Arc<AppState>> {
    let store = Arc::new(EventStore::open(&config.data_file)?);

    let report = store.seed_regions(&config.regions)?;
    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        removed = report.removed,
        total = config.regions.len(),
        "regions seeded"
    );

    Ok(Arc::new(AppState::from_config(store, config)))
}

/// Serve HTTP until Ctrl+C
pub async fn run(config: Config) -> EventHubResult<()> {
    let state = startup(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "event hub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_regions, Region};
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, regions: Vec<Region>) -> Config {
        Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            data_file: dir.path().join("hub.jsonl"),
            broadcast_capacity: 16,
            regions,
            password_cost: 4,
        }
    }

    #[test]
    fn test_startup_reseeds_regions() {
        let dir = TempDir::new().unwrap();

        let old = startup(&config_for(&dir, vec![Region::new("Atlantis")])).unwrap();
        assert_eq!(old.store.regions().len(), 1);
        drop(old);

        let state = startup(&config_for(&dir, default_regions())).unwrap();
        assert_eq!(state.store.regions(), default_regions());
    }
}
