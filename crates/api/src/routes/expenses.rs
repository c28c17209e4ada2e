//! Expense claim routes.
//!
//! Approval and rejection go through `/approvals`; reimbursement is recorded
//! here once a claim is approved.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use ridgeline_core::finance::{ExpenseCategory, ExpenseStatus, SubmitExpenseRequest};
use ridgeline_core::roles::Capability;
use ridgeline_db::ExpenseRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

const REVIEW_CAPABILITIES: &[Capability] = &[Capability::ApproveExpenses, Capability::ProcessPayments];

fn reviews_expenses(auth: &AuthUser) -> bool {
    REVIEW_CAPABILITIES.iter().any(|c| auth.can(*c))
}

/// GET `/finance/expenses`
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<ExpenseStatus, ExpenseCategory>,
) -> ApiResult<impl IntoResponse> {
    let scope = (!reviews_expenses(&auth)).then(|| auth.user_id());
    let page = ExpenseRepository::new(state.conn())
        .list(&query, auth.user_id(), scope)
        .await?;
    Ok(Json(page))
}

/// POST `/finance/expenses` - Submit a claim.
async fn submit_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<SubmitExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    let expense = ExpenseRepository::new(state.conn())
        .submit(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET `/finance/expenses/{id}`
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let expense = ExpenseRepository::new(state.conn()).find(id).await?;
    if expense.claimant_id != auth.user_id() && !reviews_expenses(&auth) {
        return Err(ApiError::missing_capability(Capability::ApproveExpenses));
    }
    Ok(Json(expense))
}

/// POST `/finance/expenses/{id}/cancel` - Withdraw one's own pending claim.
async fn cancel_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let expense = ExpenseRepository::new(state.conn())
        .cancel(id, auth.user_id())
        .await?;
    Ok(Json(expense))
}

/// POST `/finance/expenses/{id}/reimburse` - Mark an approved claim paid out.
async fn reimburse_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_any(REVIEW_CAPABILITIES)?;
    let expense = ExpenseRepository::new(state.conn())
        .reimburse(id, auth.user_id())
        .await?;
    Ok(Json(expense))
}

/// Creates expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/finance/expenses", get(list_expenses).post(submit_expense))
        .route("/finance/expenses/{id}", get(get_expense))
        .route("/finance/expenses/{id}/cancel", post(cancel_expense))
        .route("/finance/expenses/{id}/reimburse", post(reimburse_expense))
}
