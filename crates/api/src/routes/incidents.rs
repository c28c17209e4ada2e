//! Safety incident routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use ridgeline_core::roles::Capability;
use ridgeline_core::safety::{
    AssignInvestigatorRequest, IncidentStatus, IncidentType, ReportIncidentRequest,
    ResolveIncidentRequest,
};
use ridgeline_db::IncidentRepository;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ListParams, ValidJson};
use crate::middleware::auth::AuthUser;

/// GET `/safety/incidents` - Most recent first; `mine` keeps incidents the
/// caller reported.
async fn list_incidents(
    State(state): State<AppState>,
    auth: AuthUser,
    ListParams(query): ListParams<IncidentStatus, IncidentType>,
) -> ApiResult<impl IntoResponse> {
    let page = IncidentRepository::new(state.conn())
        .list(&query, auth.user_id())
        .await?;
    Ok(Json(page))
}

/// POST `/safety/incidents` - Report an incident.
async fn report_incident(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<ReportIncidentRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::ReportIncidents)?;
    let incident = IncidentRepository::new(state.conn())
        .report(auth.user_id(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(incident)))
}

/// GET `/safety/incidents/{id}`
async fn get_incident(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let incident = IncidentRepository::new(state.conn()).get(id).await?;
    Ok(Json(incident))
}

/// POST `/safety/incidents/{id}/investigate` - Assign an investigator.
async fn start_investigation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(investigator_id): ValidJson<AssignInvestigatorRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::InvestigateIncidents)?;
    let incident = IncidentRepository::new(state.conn())
        .start_investigation(id, investigator_id)
        .await?;
    Ok(Json(incident))
}

/// POST `/safety/incidents/{id}/resolve` - Record corrective actions.
async fn resolve_incident(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson((corrective_actions, root_cause)): ValidJson<ResolveIncidentRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::InvestigateIncidents)?;
    let incident = IncidentRepository::new(state.conn())
        .resolve(id, corrective_actions, root_cause)
        .await?;
    Ok(Json(incident))
}

/// POST `/safety/incidents/{id}/close`
async fn close_incident(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require(Capability::InvestigateIncidents)?;
    let incident = IncidentRepository::new(state.conn()).close(id).await?;
    Ok(Json(incident))
}

/// Creates incident routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/safety/incidents", get(list_incidents).post(report_incident))
        .route("/safety/incidents/{id}", get(get_incident))
        .route("/safety/incidents/{id}/investigate", post(start_investigation))
        .route("/safety/incidents/{id}/resolve", post(resolve_incident))
        .route("/safety/incidents/{id}/close", post(close_incident))
}
