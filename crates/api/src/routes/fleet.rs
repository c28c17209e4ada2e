//! Fleet routes: vehicles, running costs and vehicle documents.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use ridgeline_core::fleet::{
    CreateVehicleRequest, FleetCostType, FleetDocumentStatus, FleetDocumentType,
    RecordFleetCostRequest, RecordFleetDocumentRequest, VehicleStatus, VehicleType,
};
use ridgeline_core::roles::Capability;
use ridgeline_core::validation::Unfiltered;
use ridgeline_db::FleetRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

// ============================================================================
// Vehicles
// ============================================================================

/// GET `/fleet/vehicles`
async fn list_vehicles(
    State(state): State<AppState>,
    _auth: AuthUser,
    ListParams(query): ListParams<VehicleStatus, VehicleType>,
) -> ApiResult<impl IntoResponse> {
    let page = FleetRepository::new(state.conn()).list_vehicles(&query).await?;
    Ok(Json(page))
}

/// POST `/fleet/vehicles`
async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateVehicleRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageFleet)?;
    let vehicle = FleetRepository::new(state.conn()).create_vehicle(input).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// GET `/fleet/vehicles/{id}`
async fn get_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let vehicle = FleetRepository::new(state.conn()).get_vehicle(id).await?;
    Ok(Json(vehicle))
}

// ============================================================================
// Costs
// ============================================================================

/// GET `/fleet/costs` - All running costs, filterable by `type`.
async fn list_costs(
    State(state): State<AppState>,
    _auth: AuthUser,
    ListParams(query): ListParams<Unfiltered, FleetCostType>,
) -> ApiResult<impl IntoResponse> {
    let page = FleetRepository::new(state.conn())
        .list_costs(&query, None)
        .await?;
    Ok(Json(page))
}

/// GET `/fleet/vehicles/{id}/costs`
async fn list_vehicle_costs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    ListParams(query): ListParams<Unfiltered, FleetCostType>,
) -> ApiResult<impl IntoResponse> {
    let repo = FleetRepository::new(state.conn());
    repo.get_vehicle(id).await?;
    let page = repo.list_costs(&query, Some(id)).await?;
    Ok(Json(page))
}

/// POST `/fleet/costs` - Record fuel, maintenance or other running costs.
async fn record_cost(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<RecordFleetCostRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageFleet)?;
    let cost = FleetRepository::new(state.conn())
        .record_cost(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(cost)))
}

/// GET `/fleet/costs/summary` - Totals per cost type across the fleet.
async fn fleet_cost_summary(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let summary = FleetRepository::new(state.conn()).cost_summary(None).await?;
    Ok(Json(summary))
}

/// GET `/fleet/vehicles/{id}/costs/summary` - Totals per cost type for one vehicle.
async fn vehicle_cost_summary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let repo = FleetRepository::new(state.conn());
    repo.get_vehicle(id).await?;
    let summary = repo.cost_summary(Some(id)).await?;
    Ok(Json(summary))
}

// ============================================================================
// Documents
// ============================================================================

/// GET `/fleet/documents` - Licences, permits and insurance with derived
/// expiry status.
async fn list_documents(
    State(state): State<AppState>,
    _auth: AuthUser,
    ListParams(query): ListParams<FleetDocumentStatus, FleetDocumentType>,
) -> ApiResult<impl IntoResponse> {
    let page = FleetRepository::new(state.conn())
        .list_documents(&query, None)
        .await?;
    Ok(Json(page))
}

/// GET `/fleet/vehicles/{id}/documents`
async fn list_vehicle_documents(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    ListParams(query): ListParams<FleetDocumentStatus, FleetDocumentType>,
) -> ApiResult<impl IntoResponse> {
    let repo = FleetRepository::new(state.conn());
    repo.get_vehicle(id).await?;
    let page = repo.list_documents(&query, Some(id)).await?;
    Ok(Json(page))
}

/// POST `/fleet/documents`
async fn record_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<RecordFleetDocumentRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageFleet)?;
    let document = FleetRepository::new(state.conn())
        .record_document(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Creates fleet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fleet/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/fleet/vehicles/{id}", get(get_vehicle))
        .route("/fleet/vehicles/{id}/costs", get(list_vehicle_costs))
        .route("/fleet/vehicles/{id}/costs/summary", get(vehicle_cost_summary))
        .route("/fleet/vehicles/{id}/documents", get(list_vehicle_documents))
        .route("/fleet/costs", get(list_costs).post(record_cost))
        .route("/fleet/costs/summary", get(fleet_cost_summary))
        .route("/fleet/documents", get(list_documents).post(record_document))
}
