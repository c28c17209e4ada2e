//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token middleware and the [`middleware::auth::AuthUser`] extractor
//! - Validating request extractors
//! - The JSON error envelope

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use ridgeline_core::mobile::{self, MobileConfigResponse};
use ridgeline_core::notify::WebhookDispatcher;
use ridgeline_core::procurement::configured_tolerance;
use ridgeline_shared::{AppConfig, JwtConfig, JwtService};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Bearer token verification.
    pub jwt_service: Arc<JwtService>,
    /// OCR webhook queue.
    pub webhooks: WebhookDispatcher,
    /// Default three-way match tolerance, in percent.
    pub match_tolerance: Decimal,
    /// Resolved mobile app configuration.
    pub mobile: Arc<MobileConfigResponse>,
}

impl AppState {
    /// Builds the state from loaded configuration.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: &AppConfig, webhooks: WebhookDispatcher) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(JwtService::new(JwtConfig::from(&config.jwt))),
            webhooks,
            match_tolerance: configured_tolerance(&config.procurement.match_tolerance_percent),
            mobile: Arc::new(mobile::resolve(&config.mobile)),
        }
    }

    /// Returns a clone of the pooled connection for a repository.
    #[must_use]
    pub fn conn(&self) -> DatabaseConnection {
        (*self.db).clone()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
