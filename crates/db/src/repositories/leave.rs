//! Leave request repository.

use chrono::Utc;
use ridgeline_core::hr::{HrError, LeaveService, LeaveStatus, LeaveType, NewLeaveRequest};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::support::{decode, fetch_page, search_condition};
use crate::entities::leave_requests;

fn db_err(e: DbErr) -> HrError {
    HrError::Database(e.to_string())
}

/// Leave request persistence.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a pending leave request.
    ///
    /// # Errors
    ///
    /// `Overlapping` if the employee already has pending or approved leave
    /// touching the same dates.
    pub async fn create(
        &self,
        employee_id: Uuid,
        input: NewLeaveRequest,
    ) -> Result<leave_requests::Model, HrError> {
        let overlapping = leave_requests::Entity::find()
            .filter(leave_requests::Column::EmployeeId.eq(employee_id))
            .filter(leave_requests::Column::Status.is_in([
                LeaveStatus::Pending.as_str(),
                LeaveStatus::Approved.as_str(),
            ]))
            .filter(leave_requests::Column::StartDate.lte(input.end_date))
            .filter(leave_requests::Column::EndDate.gte(input.start_date))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        if overlapping > 0 {
            return Err(HrError::Overlapping);
        }

        let now = Utc::now().into();
        let leave = leave_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            leave_type: Set(input.kind.as_str().to_string()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            working_days: Set(i32::try_from(input.working_days).unwrap_or(i32::MAX)),
            reason: Set(input.reason),
            status: Set(LeaveStatus::Pending.as_str().to_string()),
            decided_by: Set(None),
            decided_at: Set(None),
            decision_notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(
            leave_request_id = %leave.id,
            employee_id = %employee_id,
            working_days = leave.working_days,
            "Leave requested"
        );
        Ok(leave)
    }

    /// Lists leave requests. `employee` scopes to one employee; `mine`
    /// scopes to the caller.
    pub async fn list(
        &self,
        query: &ListQuery<LeaveStatus, LeaveType>,
        caller: Uuid,
        employee: Option<Uuid>,
    ) -> Result<PageResponse<leave_requests::Model>, HrError> {
        let mut select =
            leave_requests::Entity::find().order_by_desc(leave_requests::Column::StartDate);
        if let Some(status) = query.status {
            select = select.filter(leave_requests::Column::Status.eq(status.as_str()));
        }
        if let Some(kind) = query.kind {
            select = select.filter(leave_requests::Column::LeaveType.eq(kind.as_str()));
        }
        if query.only_mine() {
            select = select.filter(leave_requests::Column::EmployeeId.eq(caller));
        } else if let Some(employee) = employee {
            select = select.filter(leave_requests::Column::EmployeeId.eq(employee));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(&[leave_requests::Column::Reason], term));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches a leave request.
    pub async fn find(&self, id: Uuid) -> Result<leave_requests::Model, HrError> {
        leave_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(HrError::NotFound(id))
    }

    /// Pending → Approved.
    pub async fn approve(
        &self,
        id: Uuid,
        decided_by: Uuid,
        notes: Option<String>,
    ) -> Result<leave_requests::Model, HrError> {
        let leave = self.find(id).await?;
        let next = LeaveService::approve(status_of(&leave)?)?;
        self.decide(leave, next, decided_by, notes).await
    }

    /// Pending → Rejected.
    pub async fn reject(
        &self,
        id: Uuid,
        decided_by: Uuid,
        reason: String,
    ) -> Result<leave_requests::Model, HrError> {
        let leave = self.find(id).await?;
        let next = LeaveService::reject(status_of(&leave)?)?;
        self.decide(leave, next, decided_by, Some(reason)).await
    }

    /// Cancelled by the requester, before an approved leave starts.
    pub async fn cancel(&self, id: Uuid, actor: Uuid) -> Result<leave_requests::Model, HrError> {
        let leave = self.find(id).await?;
        let next = LeaveService::cancel(
            status_of(&leave)?,
            leave.employee_id,
            actor,
            leave.start_date,
            Utc::now().date_naive(),
        )?;

        let mut active: leave_requests::ActiveModel = leave.into();
        active.status = Set(next.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(leave_request_id = %id, "Leave cancelled");
        Ok(updated)
    }

    async fn decide(
        &self,
        leave: leave_requests::Model,
        next: LeaveStatus,
        decided_by: Uuid,
        notes: Option<String>,
    ) -> Result<leave_requests::Model, HrError> {
        let id = leave.id;
        let now = Utc::now().into();
        let mut active: leave_requests::ActiveModel = leave.into();
        active.status = Set(next.as_str().to_string());
        active.decided_by = Set(Some(decided_by));
        active.decided_at = Set(Some(now));
        active.decision_notes = Set(notes);
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(leave_request_id = %id, status = %next, decided_by = %decided_by, "Leave decided");
        Ok(updated)
    }
}

pub(crate) fn status_of(leave: &leave_requests::Model) -> Result<LeaveStatus, HrError> {
    decode(&leave.status).map_err(|e| HrError::Database(e.to_string()))
}
