//! Purchase order routes, including goods receipts and invoice registration
//! against an order.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use ridgeline_core::approvals::ReasonRequest;
use ridgeline_core::procurement::{
    CreateGoodsReceiptRequest, CreateInvoiceRequest, CreatePurchaseOrderRequest,
    PurchaseOrderStatus,
};
use ridgeline_core::roles::Capability;
use ridgeline_db::{GoodsReceiptRepository, InvoiceRepository, PurchaseOrderRepository};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

// ============================================================================
// Orders
// ============================================================================

/// GET `/procurement/purchase-orders` - List orders; `mine` keeps orders the
/// caller raised.
async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<PurchaseOrderStatus>,
) -> ApiResult<impl IntoResponse> {
    let page = PurchaseOrderRepository::new(state.conn())
        .list(&query, auth.user_id())
        .await?;
    Ok(Json(page))
}

/// POST `/procurement/purchase-orders` - Raise a draft order, optionally
/// converting an approved requisition.
async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreatePurchaseOrderRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageProcurement)?;
    let detail = PurchaseOrderRepository::new(state.conn())
        .create(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET `/procurement/purchase-orders/{id}` - Order with its lines.
async fn get_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let detail = PurchaseOrderRepository::new(state.conn()).get(id).await?;
    Ok(Json(detail))
}

/// POST `/procurement/purchase-orders/{id}/submit` - Send for approval.
async fn submit_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageProcurement)?;
    let order = PurchaseOrderRepository::new(state.conn()).submit(id).await?;
    Ok(Json(order))
}

/// POST `/procurement/purchase-orders/{id}/cancel` - Cancel before anything
/// has been received.
async fn cancel_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(reason): ValidJson<ReasonRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageProcurement)?;
    let order = PurchaseOrderRepository::new(state.conn())
        .cancel(id, auth.user_id(), reason)
        .await?;
    Ok(Json(order))
}

// ============================================================================
// Goods Receipts
// ============================================================================

/// GET `/procurement/purchase-orders/{id}/receipts`
async fn list_receipts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let receipts = GoodsReceiptRepository::new(state.conn())
        .list_for_order(id)
        .await?;
    Ok(Json(receipts))
}

/// POST `/procurement/purchase-orders/{id}/receipts` - Record a delivery.
///
/// Over-receipt against any line rejects the whole receipt.
async fn receive_goods(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(input): ValidJson<CreateGoodsReceiptRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ReceiveGoods)?;
    let receipt = GoodsReceiptRepository::new(state.conn())
        .receive(id, auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

// ============================================================================
// Invoices
// ============================================================================

/// GET `/procurement/purchase-orders/{id}/invoices`
async fn list_order_invoices(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_any(&[Capability::ProcessPayments, Capability::ViewFinancials])?;
    let invoices = InvoiceRepository::new(state.conn())
        .list_for_order(id)
        .await?;
    Ok(Json(invoices))
}

/// POST `/procurement/purchase-orders/{id}/invoices` - Register a vendor invoice.
async fn register_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(input): ValidJson<CreateInvoiceRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ProcessPayments)?;
    let invoice = InvoiceRepository::new(state.conn())
        .register(id, auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Creates purchase order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/procurement/purchase-orders",
            get(list_orders).post(create_order),
        )
        .route("/procurement/purchase-orders/{id}", get(get_order))
        .route("/procurement/purchase-orders/{id}/submit", post(submit_order))
        .route("/procurement/purchase-orders/{id}/cancel", post(cancel_order))
        .route(
            "/procurement/purchase-orders/{id}/receipts",
            get(list_receipts).post(receive_goods),
        )
        .route(
            "/procurement/purchase-orders/{id}/invoices",
            get(list_order_invoices).post(register_invoice),
        )
}
