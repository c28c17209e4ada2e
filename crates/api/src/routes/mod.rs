//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod access;
pub mod approvals;
pub mod documents;
pub mod expenses;
pub mod fleet;
pub mod health;
pub mod incidents;
pub mod inventory;
pub mod invoices;
pub mod leave;
pub mod mobile;
pub mod purchase_orders;
pub mod requisitions;
pub mod tasks;
pub mod vendors;

/// Routes that need no bearer token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(mobile::routes())
}

/// Creates the API router, wrapping protected routes in the auth middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(access::routes())
        .merge(approvals::routes())
        .merge(vendors::routes())
        .merge(requisitions::routes())
        .merge(purchase_orders::routes())
        .merge(invoices::routes())
        .merge(inventory::routes())
        .merge(fleet::routes())
        .merge(leave::routes())
        .merge(incidents::routes())
        .merge(expenses::routes())
        .merge(tasks::routes())
        .merge(documents::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(public_routes()).merge(protected_routes)
}
