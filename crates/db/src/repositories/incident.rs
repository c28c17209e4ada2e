//! Safety incident repository.

use chrono::Utc;
use ridgeline_core::safety::{
    IncidentService, IncidentStatus, IncidentType, NewIncident, SafetyError,
};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::support::{decode, fetch_page, search_condition};
use crate::entities::safety_incidents;

fn db_err(e: DbErr) -> SafetyError {
    SafetyError::Database(e.to_string())
}

/// Safety incident persistence.
#[derive(Debug, Clone)]
pub struct IncidentRepository {
    db: DatabaseConnection,
}

impl IncidentRepository {
    /// Creates a new incident repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reports an incident.
    pub async fn report(
        &self,
        reported_by: Uuid,
        input: NewIncident,
    ) -> Result<safety_incidents::Model, SafetyError> {
        let now = Utc::now().into();
        let incident = safety_incidents::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            description: Set(input.description),
            incident_type: Set(input.kind.as_str().to_string()),
            severity: Set(input.severity.as_str().to_string()),
            location: Set(input.location),
            occurred_on: Set(input.occurred_on),
            injuries_reported: Set(input.injuries_reported),
            status: Set(IncidentStatus::Reported.as_str().to_string()),
            reported_by: Set(reported_by),
            investigator_id: Set(None),
            investigation_started_at: Set(None),
            corrective_actions: Set(None),
            root_cause: Set(None),
            resolved_at: Set(None),
            closed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        if incident.injuries_reported {
            warn!(
                incident_id = %incident.id,
                severity = %incident.severity,
                location = %incident.location,
                "Incident reported with injuries"
            );
        } else {
            info!(incident_id = %incident.id, severity = %incident.severity, "Incident reported");
        }
        Ok(incident)
    }

    /// Lists incidents, most recent first.
    pub async fn list(
        &self,
        query: &ListQuery<IncidentStatus, IncidentType>,
        caller: Uuid,
    ) -> Result<PageResponse<safety_incidents::Model>, SafetyError> {
        let mut select =
            safety_incidents::Entity::find().order_by_desc(safety_incidents::Column::OccurredOn);
        if let Some(status) = query.status {
            select = select.filter(safety_incidents::Column::Status.eq(status.as_str()));
        }
        if let Some(kind) = query.kind {
            select = select.filter(safety_incidents::Column::IncidentType.eq(kind.as_str()));
        }
        if query.only_mine() {
            select = select.filter(safety_incidents::Column::ReportedBy.eq(caller));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[
                    safety_incidents::Column::Title,
                    safety_incidents::Column::Description,
                    safety_incidents::Column::Location,
                ],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches an incident.
    pub async fn get(&self, id: Uuid) -> Result<safety_incidents::Model, SafetyError> {
        safety_incidents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(SafetyError::NotFound(id))
    }

    /// Reported → Investigating, assigning the investigator.
    pub async fn start_investigation(
        &self,
        id: Uuid,
        investigator_id: Uuid,
    ) -> Result<safety_incidents::Model, SafetyError> {
        let incident = self.get(id).await?;
        let next = IncidentService::start_investigation(status_of(&incident)?)?;

        let now = Utc::now().into();
        let mut active: safety_incidents::ActiveModel = incident.into();
        active.status = Set(next.as_str().to_string());
        active.investigator_id = Set(Some(investigator_id));
        active.investigation_started_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(incident_id = %id, investigator_id = %investigator_id, "Investigation started");
        Ok(updated)
    }

    /// Investigating → Resolved with corrective actions.
    pub async fn resolve(
        &self,
        id: Uuid,
        corrective_actions: String,
        root_cause: Option<String>,
    ) -> Result<safety_incidents::Model, SafetyError> {
        let incident = self.get(id).await?;
        let next = IncidentService::resolve(status_of(&incident)?)?;

        let now = Utc::now().into();
        let mut active: safety_incidents::ActiveModel = incident.into();
        active.status = Set(next.as_str().to_string());
        active.corrective_actions = Set(Some(corrective_actions));
        active.root_cause = Set(root_cause);
        active.resolved_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(incident_id = %id, "Incident resolved");
        Ok(updated)
    }

    /// Resolved → Closed.
    pub async fn close(&self, id: Uuid) -> Result<safety_incidents::Model, SafetyError> {
        let incident = self.get(id).await?;
        let next = IncidentService::close(status_of(&incident)?)?;

        let now = Utc::now().into();
        let mut active: safety_incidents::ActiveModel = incident.into();
        active.status = Set(next.as_str().to_string());
        active.closed_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(incident_id = %id, "Incident closed");
        Ok(updated)
    }
}

fn status_of(incident: &safety_incidents::Model) -> Result<IncidentStatus, SafetyError> {
    decode(&incident.status).map_err(|e| SafetyError::Database(e.to_string()))
}
