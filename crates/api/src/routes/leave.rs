//! Leave request routes.
//!
//! Approval and rejection go through `/approvals`. Callers without the
//! leave-approval capability only ever see their own requests.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use ridgeline_core::hr::{CreateLeaveRequest, LeaveStatus, LeaveType};
use ridgeline_core::roles::Capability;
use ridgeline_db::LeaveRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

/// GET `/hr/leave-requests`
async fn list_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<LeaveStatus, LeaveType>,
) -> ApiResult<impl IntoResponse> {
    let scope = (!auth.can(Capability::ApproveLeave)).then(|| auth.user_id());
    let page = LeaveRepository::new(state.conn())
        .list(&query, auth.user_id(), scope)
        .await?;
    Ok(Json(page))
}

/// POST `/hr/leave-requests` - Request leave; overlapping requests are refused.
async fn create_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateLeaveRequest>,
) -> ApiResult<impl IntoResponse> {
    let leave = LeaveRepository::new(state.conn())
        .create(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(leave)))
}

/// GET `/hr/leave-requests/{id}`
async fn get_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let leave = LeaveRepository::new(state.conn()).find(id).await?;
    if leave.employee_id != auth.user_id() && !auth.can(Capability::ApproveLeave) {
        return Err(ApiError::missing_capability(Capability::ApproveLeave));
    }
    Ok(Json(leave))
}

/// POST `/hr/leave-requests/{id}/cancel` - Withdraw one's own request.
async fn cancel_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let leave = LeaveRepository::new(state.conn())
        .cancel(id, auth.user_id())
        .await?;
    Ok(Json(leave))
}

/// Creates leave routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hr/leave-requests", get(list_leave).post(create_leave))
        .route("/hr/leave-requests/{id}", get(get_leave))
        .route("/hr/leave-requests/{id}/cancel", post(cancel_leave))
}
