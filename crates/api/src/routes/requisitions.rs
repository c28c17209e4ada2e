//! Purchase requisition routes.
//!
//! Approval and rejection go through `/approvals`; raising a purchase order
//! from an approved requisition converts it.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use ridgeline_core::approvals::ReasonRequest;
use ridgeline_core::procurement::{CreateRequisitionRequest, RequisitionStatus};
use ridgeline_core::roles::Capability;
use ridgeline_db::RequisitionRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

/// GET `/procurement/requisitions` - List requisitions; `mine` keeps the
/// caller's own.
async fn list_requisitions(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<RequisitionStatus>,
) -> ApiResult<impl IntoResponse> {
    let page = RequisitionRepository::new(state.conn())
        .list(&query, auth.user_id())
        .await?;
    Ok(Json(page))
}

/// POST `/procurement/requisitions` - Raise a draft requisition.
async fn create_requisition(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateRequisitionRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageProcurement)?;
    let detail = RequisitionRepository::new(state.conn())
        .create(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET `/procurement/requisitions/{id}` - Requisition with its lines.
async fn get_requisition(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let detail = RequisitionRepository::new(state.conn()).get(id).await?;
    Ok(Json(detail))
}

/// POST `/procurement/requisitions/{id}/submit` - Send for approval.
async fn submit_requisition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageProcurement)?;
    let requisition = RequisitionRepository::new(state.conn()).submit(id).await?;
    Ok(Json(requisition))
}

/// POST `/procurement/requisitions/{id}/cancel` - Withdraw with a reason.
async fn cancel_requisition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(reason): ValidJson<ReasonRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageProcurement)?;
    let requisition = RequisitionRepository::new(state.conn())
        .cancel(id, auth.user_id(), reason)
        .await?;
    Ok(Json(requisition))
}

/// Creates requisition routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/procurement/requisitions",
            get(list_requisitions).post(create_requisition),
        )
        .route("/procurement/requisitions/{id}", get(get_requisition))
        .route("/procurement/requisitions/{id}/submit", post(submit_requisition))
        .route("/procurement/requisitions/{id}/cancel", post(cancel_requisition))
}
