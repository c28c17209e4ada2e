//! Requisition repository.
//!
//! Requisitions are the internal request that precedes a purchase order.
//! Approval and rejection arrive through the approvals inbox.

use chrono::Utc;
use ridgeline_core::procurement::{
    NewRequisition, ProcurementError, RequisitionService, RequisitionStatus,
};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::support::{decode, fetch_page, reference_number, search_condition};
use crate::entities::{requisition_lines, requisitions};

fn db_err(e: DbErr) -> ProcurementError {
    ProcurementError::Database(e.to_string())
}

/// A requisition with its lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionDetail {
    /// Header.
    #[serde(flatten)]
    pub requisition: requisitions::Model,
    /// Lines in order.
    pub lines: Vec<requisition_lines::Model>,
}

/// Requisition persistence and state transitions.
#[derive(Debug, Clone)]
pub struct RequisitionRepository {
    db: DatabaseConnection,
}

impl RequisitionRepository {
    /// Creates a new requisition repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft requisition with its lines.
    pub async fn create(
        &self,
        requested_by: Uuid,
        input: NewRequisition,
    ) -> Result<RequisitionDetail, ProcurementError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let requisition = requisitions::ActiveModel {
            id: Set(id),
            requisition_number: Set(reference_number("REQ", id, now)),
            title: Set(input.title),
            justification: Set(input.justification),
            department: Set(input.department),
            needed_by: Set(input.needed_by),
            status: Set(RequisitionStatus::Draft.as_str().to_string()),
            estimated_total: Set(input.estimated_total),
            requested_by: Set(requested_by),
            submitted_at: Set(None),
            decided_by: Set(None),
            decided_at: Set(None),
            decision_notes: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (line_number, line) in (1..).zip(input.lines) {
            let model = requisition_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                requisition_id: Set(id),
                line_number: Set(line_number),
                description: Set(line.description),
                stock_item_id: Set(line.stock_item_id),
                quantity: Set(line.quantity),
                unit: Set(line.unit),
                estimated_unit_price: Set(line.estimated_unit_price),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
            lines.push(model);
        }

        txn.commit().await.map_err(db_err)?;

        info!(requisition_id = %id, number = %requisition.requisition_number, "Requisition created");
        Ok(RequisitionDetail { requisition, lines })
    }

    /// Lists requisitions. `mine` restricts to the caller's own.
    pub async fn list(
        &self,
        query: &ListQuery<RequisitionStatus>,
        caller: Uuid,
    ) -> Result<PageResponse<requisitions::Model>, ProcurementError> {
        let mut select = requisitions::Entity::find().order_by_desc(requisitions::Column::CreatedAt);
        if let Some(status) = query.status {
            select = select.filter(requisitions::Column::Status.eq(status.as_str()));
        }
        if query.only_mine() {
            select = select.filter(requisitions::Column::RequestedBy.eq(caller));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[
                    requisitions::Column::Title,
                    requisitions::Column::RequisitionNumber,
                    requisitions::Column::Department,
                ],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches a requisition header.
    pub async fn find(&self, id: Uuid) -> Result<requisitions::Model, ProcurementError> {
        requisitions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::RequisitionNotFound(id))
    }

    /// Fetches a requisition with its lines.
    pub async fn get(&self, id: Uuid) -> Result<RequisitionDetail, ProcurementError> {
        let requisition = self.find(id).await?;
        let lines = requisition_lines::Entity::find()
            .filter(requisition_lines::Column::RequisitionId.eq(id))
            .order_by_asc(requisition_lines::Column::LineNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(RequisitionDetail { requisition, lines })
    }

    /// Draft → PendingApproval.
    pub async fn submit(&self, id: Uuid) -> Result<requisitions::Model, ProcurementError> {
        let requisition = self.find(id).await?;
        let next = RequisitionService::submit(status_of(&requisition)?)?;

        let now = Utc::now().into();
        let mut active: requisitions::ActiveModel = requisition.into();
        active.status = Set(next.as_str().to_string());
        active.submitted_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(requisition_id = %id, "Requisition submitted");
        Ok(updated)
    }

    /// PendingApproval → Approved.
    pub async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
        notes: Option<String>,
    ) -> Result<requisitions::Model, ProcurementError> {
        let requisition = self.find(id).await?;
        let next = RequisitionService::approve(status_of(&requisition)?)?;
        let updated = self.decide(requisition, next, approved_by, notes).await?;
        info!(requisition_id = %id, approved_by = %approved_by, "Requisition approved");
        Ok(updated)
    }

    /// PendingApproval → Rejected.
    pub async fn reject(
        &self,
        id: Uuid,
        rejected_by: Uuid,
        reason: String,
    ) -> Result<requisitions::Model, ProcurementError> {
        let requisition = self.find(id).await?;
        let next = RequisitionService::reject(status_of(&requisition)?)?;
        let updated = self.decide(requisition, next, rejected_by, Some(reason)).await?;
        info!(requisition_id = %id, rejected_by = %rejected_by, "Requisition rejected");
        Ok(updated)
    }

    /// Draft | PendingApproval | Approved → Cancelled.
    pub async fn cancel(
        &self,
        id: Uuid,
        cancelled_by: Uuid,
        reason: String,
    ) -> Result<requisitions::Model, ProcurementError> {
        let requisition = self.find(id).await?;
        let next = RequisitionService::cancel(status_of(&requisition)?)?;
        let updated = self.decide(requisition, next, cancelled_by, Some(reason)).await?;
        info!(requisition_id = %id, cancelled_by = %cancelled_by, "Requisition cancelled");
        Ok(updated)
    }

    async fn decide(
        &self,
        requisition: requisitions::Model,
        next: RequisitionStatus,
        actor: Uuid,
        notes: Option<String>,
    ) -> Result<requisitions::Model, ProcurementError> {
        let now = Utc::now().into();
        let mut active: requisitions::ActiveModel = requisition.into();
        active.status = Set(next.as_str().to_string());
        active.decided_by = Set(Some(actor));
        active.decided_at = Set(Some(now));
        active.decision_notes = Set(notes);
        active.updated_at = Set(now);
        active.update(&self.db).await.map_err(db_err)
    }
}

pub(crate) fn status_of(
    requisition: &requisitions::Model,
) -> Result<RequisitionStatus, ProcurementError> {
    decode(&requisition.status).map_err(|e| ProcurementError::Database(e.to_string()))
}
