//! Task routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use ridgeline_core::tasks::{CreateTaskRequest, TaskPriority, TaskStatus, UpdateTaskStatusRequest};
use ridgeline_db::TaskRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

/// GET `/tasks` - `type` filters by priority; `mine` keeps tasks assigned
/// to the caller.
async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<TaskStatus, TaskPriority>,
) -> ApiResult<impl IntoResponse> {
    let page = TaskRepository::new(state.conn())
        .list(&query, auth.user_id())
        .await?;
    Ok(Json(page))
}

/// POST `/tasks`
async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    let task = TaskRepository::new(state.conn())
        .create(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET `/tasks/{id}`
async fn get_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let task = TaskRepository::new(state.conn()).get(id).await?;
    Ok(Json(task))
}

/// PATCH `/tasks/{id}/status` - Move a task along its board.
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(status): ValidJson<UpdateTaskStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let task = TaskRepository::new(state.conn())
        .update_status(id, status, auth.user_id())
        .await?;
    Ok(Json(task))
}

/// Creates task routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task))
        .route("/tasks/{id}/status", patch(update_status))
}
