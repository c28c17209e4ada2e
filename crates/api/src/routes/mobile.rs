//! Configuration for the companion mobile app.

use axum::{Json, Router, extract::State, routing::get};
use ridgeline_core::mobile::MobileConfigResponse;

use crate::AppState;

/// GET `/mobile/config` - Minimum versions, store links and feature flags.
///
/// Resolved once at start-up; malformed settings have already fallen back
/// to their defaults.
async fn mobile_config(State(state): State<AppState>) -> Json<MobileConfigResponse> {
    Json(state.mobile.as_ref().clone())
}

/// Creates mobile configuration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/mobile/config", get(mobile_config))
}
