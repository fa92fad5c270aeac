use anyhow::Result;
use std::sync::Arc;

use caixa_ingest::{config, logging, routes, services::finance_store::SqliteStore, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::load_config()?;

    let store = SqliteStore::open(&config.database_path, &config.default_sheet_url)?;

    // Build our application state
    let addr = config.bind_addr;
    let state = Arc::new(AppState::new(config, store));

    let app = routes::app(state);

    // Run it
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
