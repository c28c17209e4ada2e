//! Pending items across the approval verticals.

use chrono::Utc;
use ridgeline_core::approvals::{ApprovalError, ApprovalItem, ApprovalKind};
use ridgeline_core::finance::ExpenseStatus;
use ridgeline_core::hr::LeaveStatus;
use ridgeline_core::procurement::{PurchaseOrderStatus, RequisitionStatus};
use ridgeline_shared::types::{PageRequest, PageResponse};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{expenses, leave_requests, purchase_orders, requisitions};

fn db_err(e: DbErr) -> ApprovalError {
    ApprovalError::Database(e.to_string())
}

/// Builds the approvals inbox.
///
/// Each vertical contributes its pending rows; the merged list is ordered
/// oldest first and paginated in memory.
#[derive(Debug, Clone)]
pub struct ApprovalInboxRepository {
    db: DatabaseConnection,
}

impl ApprovalInboxRepository {
    /// Creates a new inbox repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pending items of the given kinds. `requested_by` keeps only items
    /// that user raised.
    pub async fn pending(
        &self,
        kinds: &[ApprovalKind],
        requested_by: Option<Uuid>,
        page: PageRequest,
    ) -> Result<PageResponse<ApprovalItem>, ApprovalError> {
        let mut items = Vec::new();
        for kind in kinds {
            match kind {
                ApprovalKind::Requisition => {
                    items.extend(self.pending_requisitions(requested_by).await?);
                }
                ApprovalKind::PurchaseOrder => {
                    items.extend(self.pending_purchase_orders(requested_by).await?);
                }
                ApprovalKind::LeaveRequest => {
                    items.extend(self.pending_leave(requested_by).await?);
                }
                ApprovalKind::Expense => items.extend(self.pending_expenses(requested_by).await?),
            }
        }
        items.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at).then(a.id.cmp(&b.id)));

        Ok(PageResponse::from_vec(items, page))
    }

    async fn pending_requisitions(
        &self,
        requested_by: Option<Uuid>,
    ) -> Result<Vec<ApprovalItem>, ApprovalError> {
        let mut select = requisitions::Entity::find().filter(
            requisitions::Column::Status.eq(RequisitionStatus::PendingApproval.as_str()),
        );
        if let Some(user) = requested_by {
            select = select.filter(requisitions::Column::RequestedBy.eq(user));
        }
        let rows = select.all(&self.db).await.map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|r| ApprovalItem {
                kind: ApprovalKind::Requisition,
                id: r.id,
                title: format!("{} {}", r.requisition_number, r.title),
                requested_by: r.requested_by,
                amount: Some(r.estimated_total),
                currency: None,
                submitted_at: r.submitted_at.unwrap_or(r.created_at).with_timezone(&Utc),
            })
            .collect())
    }

    async fn pending_purchase_orders(
        &self,
        requested_by: Option<Uuid>,
    ) -> Result<Vec<ApprovalItem>, ApprovalError> {
        let mut select = purchase_orders::Entity::find().filter(
            purchase_orders::Column::Status.eq(PurchaseOrderStatus::PendingApproval.as_str()),
        );
        if let Some(user) = requested_by {
            select = select.filter(purchase_orders::Column::CreatedBy.eq(user));
        }
        let rows = select.all(&self.db).await.map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|o| ApprovalItem {
                kind: ApprovalKind::PurchaseOrder,
                id: o.id,
                title: o.po_number,
                requested_by: o.created_by,
                amount: Some(o.total_amount),
                currency: Some(o.currency),
                submitted_at: o.submitted_at.unwrap_or(o.created_at).with_timezone(&Utc),
            })
            .collect())
    }

    async fn pending_leave(
        &self,
        requested_by: Option<Uuid>,
    ) -> Result<Vec<ApprovalItem>, ApprovalError> {
        let mut select = leave_requests::Entity::find()
            .filter(leave_requests::Column::Status.eq(LeaveStatus::Pending.as_str()));
        if let Some(user) = requested_by {
            select = select.filter(leave_requests::Column::EmployeeId.eq(user));
        }
        let rows = select.all(&self.db).await.map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|l| ApprovalItem {
                kind: ApprovalKind::LeaveRequest,
                id: l.id,
                title: format!(
                    "{} leave {} to {} ({} days)",
                    l.leave_type, l.start_date, l.end_date, l.working_days
                ),
                requested_by: l.employee_id,
                amount: None,
                currency: None,
                submitted_at: l.created_at.with_timezone(&Utc),
            })
            .collect())
    }

    async fn pending_expenses(
        &self,
        requested_by: Option<Uuid>,
    ) -> Result<Vec<ApprovalItem>, ApprovalError> {
        let mut select = expenses::Entity::find()
            .filter(expenses::Column::Status.eq(ExpenseStatus::Pending.as_str()));
        if let Some(user) = requested_by {
            select = select.filter(expenses::Column::ClaimantId.eq(user));
        }
        let rows = select.all(&self.db).await.map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|e| ApprovalItem {
                kind: ApprovalKind::Expense,
                id: e.id,
                title: e.description,
                requested_by: e.claimant_id,
                amount: Some(e.amount),
                currency: Some(e.currency),
                submitted_at: e.created_at.with_timezone(&Utc),
            })
            .collect())
    }
}
