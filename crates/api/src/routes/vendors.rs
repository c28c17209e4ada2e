//! Vendor master routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use ridgeline_core::procurement::CreateVendorRequest;
use ridgeline_core::roles::Capability;
use ridgeline_db::VendorRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

/// GET `/procurement/vendors` - List vendors, searchable by name or code.
async fn list_vendors(
    State(state): State<AppState>,
    _auth: AuthUser,
    ListParams(query): ListParams,
) -> ApiResult<impl IntoResponse> {
    let page = VendorRepository::new(state.conn()).list(&query).await?;
    Ok(Json(page))
}

/// POST `/procurement/vendors` - Register a vendor.
async fn create_vendor(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateVendorRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageProcurement)?;
    let vendor = VendorRepository::new(state.conn()).create(input).await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// GET `/procurement/vendors/{id}`
async fn get_vendor(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let vendor = VendorRepository::new(state.conn()).get(id).await?;
    Ok(Json(vendor))
}

/// Creates vendor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/procurement/vendors", get(list_vendors).post(create_vendor))
        .route("/procurement/vendors/{id}", get(get_vendor))
}
