//! Approvals inbox routes.
//!
//! Pending requisitions, purchase orders, leave requests and expenses are
//! listed together. Decisions are dispatched to the owning vertical after
//! the caller's capability and the no-self-approval rule have been checked.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use ridgeline_core::approvals::{ApprovalItem, ApprovalKind, ApprovalPolicy, ApproveRequest, ReasonRequest};
use ridgeline_core::validation::Unfiltered;
use ridgeline_db::{
    ApprovalInboxRepository, ExpenseRepository, LeaveRepository, PurchaseOrderRepository,
    RequisitionRepository,
};
use ridgeline_shared::types::PageResponse;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

// ============================================================================
// Response Types
// ============================================================================

/// Outcome of an approve or reject call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    /// Kind of record decided on.
    pub kind: ApprovalKind,
    /// Record id.
    pub id: Uuid,
    /// Status after the decision.
    pub status: String,
}

/// Approve or reject.
#[derive(Debug)]
enum Decision {
    Approve(Option<String>),
    Reject(String),
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/approvals` - Pending items the caller may decide on.
///
/// With `mine=true` lists pending items the caller raised instead, whatever
/// their capabilities. `type` narrows to one kind.
async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<Unfiltered, ApprovalKind>,
) -> ApiResult<Json<PageResponse<ApprovalItem>>> {
    let requested: Vec<ApprovalKind> = match query.kind {
        Some(kind) => vec![kind],
        None => ApprovalKind::ALL.to_vec(),
    };

    let (kinds, requested_by) = if query.only_mine() {
        (requested, Some(auth.user_id()))
    } else {
        if let Some(kind) = query.kind {
            ApprovalPolicy::authorize(auth.access(), kind)?;
        }
        let allowed = requested
            .into_iter()
            .filter(|k| ApprovalPolicy::authorize(auth.access(), *k).is_ok())
            .collect();
        (allowed, None)
    };

    let repo = ApprovalInboxRepository::new(state.conn());
    let page = repo.pending(&kinds, requested_by, query.page).await?;
    Ok(Json(page))
}

/// POST `/approvals/{kind}/{id}/approve` - Approve a pending item.
async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
    ValidJson(notes): ValidJson<ApproveRequest>,
) -> ApiResult<Json<DecisionResponse>> {
    decide(&state, &auth, &kind, id, Decision::Approve(notes)).await
}

/// POST `/approvals/{kind}/{id}/reject` - Reject a pending item with a reason.
async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
    ValidJson(reason): ValidJson<ReasonRequest>,
) -> ApiResult<Json<DecisionResponse>> {
    decide(&state, &auth, &kind, id, Decision::Reject(reason)).await
}

async fn decide(
    state: &AppState,
    auth: &AuthUser,
    segment: &str,
    id: Uuid,
    decision: Decision,
) -> ApiResult<Json<DecisionResponse>> {
    let kind = ApprovalPolicy::kind(segment)?;
    ApprovalPolicy::authorize(auth.access(), kind)?;
    let decided_by = auth.user_id();
    let approved = matches!(decision, Decision::Approve(_));

    let status = match kind {
        ApprovalKind::Requisition => {
            let repo = RequisitionRepository::new(state.conn());
            let requisition = repo.find(id).await?;
            ApprovalPolicy::ensure_not_requester(kind, requisition.requested_by, decided_by)?;
            match decision {
                Decision::Approve(notes) => repo.approve(id, decided_by, notes).await?.status,
                Decision::Reject(reason) => repo.reject(id, decided_by, reason).await?.status,
            }
        }
        ApprovalKind::PurchaseOrder => {
            let repo = PurchaseOrderRepository::new(state.conn());
            let order = repo.find(id).await?;
            ApprovalPolicy::ensure_not_requester(kind, order.created_by, decided_by)?;
            match decision {
                Decision::Approve(_) => repo.approve(id, decided_by).await?.status,
                Decision::Reject(reason) => repo.reject(id, decided_by, reason).await?.status,
            }
        }
        ApprovalKind::LeaveRequest => {
            let repo = LeaveRepository::new(state.conn());
            let leave = repo.find(id).await?;
            ApprovalPolicy::ensure_not_requester(kind, leave.employee_id, decided_by)?;
            match decision {
                Decision::Approve(notes) => repo.approve(id, decided_by, notes).await?.status,
                Decision::Reject(reason) => repo.reject(id, decided_by, reason).await?.status,
            }
        }
        ApprovalKind::Expense => {
            let repo = ExpenseRepository::new(state.conn());
            let expense = repo.find(id).await?;
            ApprovalPolicy::ensure_not_requester(kind, expense.claimant_id, decided_by)?;
            match decision {
                Decision::Approve(notes) => repo.approve(id, decided_by, notes).await?.status,
                Decision::Reject(reason) => repo.reject(id, decided_by, reason).await?.status,
            }
        }
    };

    info!(
        kind = kind.as_str(),
        %id,
        %decided_by,
        approved,
        "Approval decision recorded"
    );
    Ok(Json(DecisionResponse { kind, id, status }))
}

/// Creates approvals routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/approvals", get(list_pending))
        .route("/approvals/{kind}/{id}/approve", post(approve))
        .route("/approvals/{kind}/{id}/reject", post(reject))
}
