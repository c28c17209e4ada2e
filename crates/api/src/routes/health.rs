//! Liveness and readiness probes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Probe response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `unavailable`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

impl HealthResponse {
    const fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET `/health` - The process is up. Never touches the database.
async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// GET `/health/ready` - 503 while the database cannot be reached.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::new("healthy"))),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new("unavailable")),
            )
        }
    }
}

/// Creates the probe routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/ready", get(readiness))
}
