//! Document and OCR job routes.
//!
//! The OCR worker reports results through `/ocr-jobs/{id}/complete` and
//! `/ocr-jobs/{id}/fail`; each finished job is queued for the signed
//! webhook once the result is stored.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use ridgeline_core::documents::{
    CompleteOcrJobRequest, DocumentCategory, FailOcrJobRequest, OcrJobStatus, OcrOutcome,
    RegisterDocumentRequest,
};
use ridgeline_core::notify::OcrWebhookPayload;
use ridgeline_core::roles::Capability;
use ridgeline_core::validation::Unfiltered;
use ridgeline_db::DocumentRepository;
use ridgeline_db::entities::ocr_jobs;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

// ============================================================================
// Documents
// ============================================================================

/// GET `/documents` - `type` filters by category.
async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<Unfiltered, DocumentCategory>,
) -> ApiResult<impl IntoResponse> {
    let page = DocumentRepository::new(state.conn())
        .list(&query, auth.user_id())
        .await?;
    Ok(Json(page))
}

/// POST `/documents` - Register uploaded file metadata and queue OCR.
async fn register_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<RegisterDocumentRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageDocuments)?;
    let detail = DocumentRepository::new(state.conn())
        .register(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET `/documents/{id}` - Document with its OCR jobs.
async fn get_document(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let detail = DocumentRepository::new(state.conn()).get(id).await?;
    Ok(Json(detail))
}

/// POST `/documents/{id}/ocr` - Queue another OCR run.
async fn requeue_ocr(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageDocuments)?;
    let job = DocumentRepository::new(state.conn()).requeue(id).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

// ============================================================================
// OCR Jobs
// ============================================================================

/// GET `/ocr-jobs` - Oldest first, filterable by status.
async fn list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<OcrJobStatus>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageDocuments)?;
    let page = DocumentRepository::new(state.conn()).list_jobs(&query).await?;
    Ok(Json(page))
}

/// POST `/ocr-jobs/{id}/start`
async fn start_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ManageDocuments)?;
    let job = DocumentRepository::new(state.conn()).start_job(id).await?;
    Ok(Json(job))
}

/// POST `/ocr-jobs/{id}/complete`
async fn complete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(outcome): ValidJson<CompleteOcrJobRequest>,
) -> ApiResult<impl IntoResponse> {
    finish(&state, &auth, id, outcome).await
}

/// POST `/ocr-jobs/{id}/fail`
async fn fail_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(outcome): ValidJson<FailOcrJobRequest>,
) -> ApiResult<impl IntoResponse> {
    finish(&state, &auth, id, outcome).await
}

async fn finish(
    state: &AppState,
    auth: &AuthUser,
    id: Uuid,
    outcome: OcrOutcome,
) -> ApiResult<Json<ocr_jobs::Model>> {
    auth.require(Capability::ManageDocuments)?;
    let job = DocumentRepository::new(state.conn())
        .finish_job(id, &outcome)
        .await?;

    let finished_at = job
        .completed_at
        .map_or_else(Utc::now, |at| at.with_timezone(&Utc));
    state.webhooks.notify(&OcrWebhookPayload::for_outcome(
        job.id,
        job.document_id,
        &outcome,
        finished_at,
    ));

    Ok(Json(job))
}

/// Creates document and OCR job routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(register_document))
        .route("/documents/{id}", get(get_document))
        .route("/documents/{id}/ocr", post(requeue_ocr))
        .route("/ocr-jobs", get(list_jobs))
        .route("/ocr-jobs/{id}/start", post(start_job))
        .route("/ocr-jobs/{id}/complete", post(complete_job))
        .route("/ocr-jobs/{id}/fail", post(fail_job))
}
