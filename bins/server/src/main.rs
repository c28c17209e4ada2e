//! Ridgeline API Server
//!
//! Main entry point for the Ridgeline backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ridgeline_api::{AppState, create_router};
use ridgeline_core::notify::WebhookDispatcher;
use ridgeline_db::connect;
use ridgeline_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ridgeline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect(&config.database)
        .await
        .context("failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let webhooks = WebhookDispatcher::spawn(&config.webhook)?;
    let destinations = config.webhook.destinations();
    if destinations.is_empty() {
        warn!("No OCR webhook destinations configured, notifications disabled");
    } else {
        info!(count = destinations.len(), "OCR webhook delivery started");
    }

    let state = AppState::new(db, &config, webhooks);
    info!(
        tolerance_percent = %state.match_tolerance,
        "Three-way match tolerance configured"
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
