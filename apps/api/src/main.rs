mod config;
mod db;
mod errors;
mod interview;
mod persistence;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::interview::service::InterviewService;
use crate::persistence::{JsonFileSink, PersistenceSink, PgSnapshotSink};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout API v{}", env!("CARGO_PKG_VERSION"));

    // Persistence sink: PostgreSQL when configured, JSON files otherwise
    let sink = build_sink(&config).await?;
    info!("Persistence sink: {}", sink.name());

    let state = AppState {
        interview: InterviewService::new(sink, config.transcript_limit),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the chat frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_sink(config: &Config) -> Result<Arc<dyn PersistenceSink>> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool)
                .await
                .context("Failed to create candidate_snapshots table")?;
            Ok(Arc::new(PgSnapshotSink::new(pool)))
        }
        None => Ok(Arc::new(JsonFileSink::new(&config.candidate_data_dir))),
    }
}
