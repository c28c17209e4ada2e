//! Vendor invoice routes: three-way match, dispute override, payments and
//! procurement metrics.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use ridgeline_core::procurement::{
    MatchInvoiceRequest, MatchStatus, OverrideMatchRequest, RecordPaymentRequest,
};
use ridgeline_core::roles::Capability;
use ridgeline_db::{InvoiceRepository, ProcurementReportRepository};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

const READ_CAPABILITIES: &[Capability] = &[Capability::ProcessPayments, Capability::ViewFinancials];

// ============================================================================
// Invoices
// ============================================================================

/// GET `/procurement/invoices` - List invoices, filterable by match status.
async fn list_invoices(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<MatchStatus>,
) -> ApiResult<impl IntoResponse> {
    auth.require_any(READ_CAPABILITIES)?;
    let page = InvoiceRepository::new(state.conn()).list(&query).await?;
    Ok(Json(page))
}

/// GET `/procurement/invoices/{id}` - Invoice with lines and payments.
async fn get_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_any(READ_CAPABILITIES)?;
    let detail = InvoiceRepository::new(state.conn()).get(id).await?;
    Ok(Json(detail))
}

/// POST `/procurement/invoices/{id}/match` - Run (or re-run) the three-way match.
///
/// `tolerancePercent` overrides the configured default for this run only.
/// Refused with 409 once payment has started or after a manual override.
async fn match_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(tolerance): ValidJson<MatchInvoiceRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ProcessPayments)?;
    let tolerance = tolerance.unwrap_or(state.match_tolerance);
    let detail = InvoiceRepository::new(state.conn())
        .match_invoice(id, tolerance)
        .await?;
    Ok(Json(detail))
}

/// POST `/procurement/invoices/{id}/override` - Accept a disputed match.
async fn override_match(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(notes): ValidJson<OverrideMatchRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::OverrideMatch)?;
    let invoice = InvoiceRepository::new(state.conn())
        .override_match(id, auth.user_id(), notes)
        .await?;
    Ok(Json(invoice))
}

// ============================================================================
// Payments
// ============================================================================

/// GET `/procurement/invoices/{id}/payments`
async fn list_payments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_any(READ_CAPABILITIES)?;
    let payments = InvoiceRepository::new(state.conn()).list_payments(id).await?;
    Ok(Json(payments))
}

/// POST `/procurement/invoices/{id}/payments` - Pay part or all of a matched invoice.
async fn record_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(input): ValidJson<RecordPaymentRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ProcessPayments)?;
    let receipt = InvoiceRepository::new(state.conn())
        .record_payment(id, auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

// ============================================================================
// Reporting
// ============================================================================

/// GET `/procurement/metrics` - Compliance rate, match rate and cycle time.
async fn metrics(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ViewFinancials)?;
    let metrics = ProcurementReportRepository::new(state.conn()).metrics().await?;
    Ok(Json(metrics))
}

/// Creates invoice and metrics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/procurement/invoices", get(list_invoices))
        .route("/procurement/invoices/{id}", get(get_invoice))
        .route("/procurement/invoices/{id}/match", post(match_invoice))
        .route("/procurement/invoices/{id}/override", post(override_match))
        .route(
            "/procurement/invoices/{id}/payments",
            get(list_payments).post(record_payment),
        )
        .route("/procurement/metrics", get(metrics))
}
