//! Inventory routes: warehouses, stock items and movements.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use ridgeline_core::inventory::{
    CreateStockItemRequest, CreateWarehouseRequest, MovementType, RecordMovementRequest,
    StockItemQueryParams,
};
use ridgeline_core::roles::Capability;
use ridgeline_core::validation::Unfiltered;
use ridgeline_db::InventoryRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson, ValidQuery};
use crate::middleware::auth::AuthUser;

// ============================================================================
// Warehouses
// ============================================================================

/// GET `/inventory/warehouses`
async fn list_warehouses(
    State(state): State<AppState>,
    _auth: AuthUser,
    ListParams(query): ListParams,
) -> ApiResult<impl IntoResponse> {
    let page = InventoryRepository::new(state.conn())
        .list_warehouses(&query)
        .await?;
    Ok(Json(page))
}

/// POST `/inventory/warehouses`
async fn create_warehouse(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateWarehouseRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageInventory)?;
    let warehouse = InventoryRepository::new(state.conn())
        .create_warehouse(input)
        .await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

// ============================================================================
// Stock Items
// ============================================================================

/// GET `/inventory/items` - Items with on-hand totals.
///
/// `lowStock=true` keeps items at or below their reorder level;
/// `warehouseId` keeps items stocked in that warehouse.
async fn list_items(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidQuery(query): ValidQuery<StockItemQueryParams>,
) -> ApiResult<impl IntoResponse> {
    let page = InventoryRepository::new(state.conn()).list_items(&query).await?;
    Ok(Json(page))
}

/// POST `/inventory/items`
async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateStockItemRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageInventory)?;
    let item = InventoryRepository::new(state.conn()).create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET `/inventory/items/{id}` - Item with per-warehouse levels.
async fn get_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let item = InventoryRepository::new(state.conn()).get_item(id).await?;
    Ok(Json(item))
}

/// GET `/inventory/items/{id}/movements` - Movement history of one item.
async fn list_item_movements(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    ListParams(query): ListParams<Unfiltered, MovementType>,
) -> ApiResult<impl IntoResponse> {
    let page = InventoryRepository::new(state.conn())
        .list_movements(&query, Some(id))
        .await?;
    Ok(Json(page))
}

// ============================================================================
// Movements
// ============================================================================

/// GET `/inventory/movements` - All movements, filterable by `type`.
async fn list_movements(
    State(state): State<AppState>,
    _auth: AuthUser,
    ListParams(query): ListParams<Unfiltered, MovementType>,
) -> ApiResult<impl IntoResponse> {
    let page = InventoryRepository::new(state.conn())
        .list_movements(&query, None)
        .await?;
    Ok(Json(page))
}

/// POST `/inventory/movements` - Post a movement and update stock levels.
async fn record_movement(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(movement): ValidJson<RecordMovementRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageInventory)?;
    let movement = InventoryRepository::new(state.conn())
        .record_movement(auth.user_id(), movement)
        .await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Creates inventory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/inventory/warehouses",
            get(list_warehouses).post(create_warehouse),
        )
        .route("/inventory/items", get(list_items).post(create_item))
        .route("/inventory/items/{id}", get(get_item))
        .route("/inventory/items/{id}/movements", get(list_item_movements))
        .route(
            "/inventory/movements",
            get(list_movements).post(record_movement),
        )
}
