mod config;
mod db;
mod errors;
mod favorites;
mod jobs;
mod models;
mod preferences;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, JobStore, PgJobStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LastDance API v{}", env!("CARGO_PKG_VERSION"));

    // Pick the persistence backend
    let store: Arc<dyn JobStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            if let Err(e) = run_migrations(&pool).await {
                error!("{e:#}");
            }
            Arc::new(PgJobStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; preferences and favorites live in memory only");
            Arc::new(InMemoryStore::new())
        }
    };

    info!(
        "Reading {} CSV sources from {}",
        config.csv_sources.len(),
        config.data_dir.display()
    );

    let port = config.port;
    let state = AppState::new(store, config);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
