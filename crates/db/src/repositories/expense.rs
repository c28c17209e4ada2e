//! Expense claim repository.

use chrono::Utc;
use ridgeline_core::finance::{ExpenseCategory, ExpenseService, ExpenseStatus, FinanceError, NewExpense};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::support::{decode, fetch_page, search_condition};
use crate::entities::expenses;

fn db_err(e: DbErr) -> FinanceError {
    FinanceError::Database(e.to_string())
}

/// Expense claim persistence.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits a pending claim.
    pub async fn submit(
        &self,
        claimant_id: Uuid,
        input: NewExpense,
    ) -> Result<expenses::Model, FinanceError> {
        let now = Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            claimant_id: Set(claimant_id),
            category: Set(input.category.as_str().to_string()),
            amount: Set(input.amount),
            currency: Set(input.currency),
            description: Set(input.description),
            incurred_on: Set(input.incurred_on),
            receipt_url: Set(input.receipt_url),
            status: Set(ExpenseStatus::Pending.as_str().to_string()),
            decided_by: Set(None),
            decided_at: Set(None),
            decision_notes: Set(None),
            reimbursed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(
            expense_id = %expense.id,
            claimant_id = %claimant_id,
            amount = %expense.amount,
            currency = %expense.currency,
            "Expense submitted"
        );
        Ok(expense)
    }

    /// Lists claims. `claimant` scopes to one claimant; `mine` scopes to the caller.
    pub async fn list(
        &self,
        query: &ListQuery<ExpenseStatus, ExpenseCategory>,
        caller: Uuid,
        claimant: Option<Uuid>,
    ) -> Result<PageResponse<expenses::Model>, FinanceError> {
        let mut select = expenses::Entity::find().order_by_desc(expenses::Column::CreatedAt);
        if let Some(status) = query.status {
            select = select.filter(expenses::Column::Status.eq(status.as_str()));
        }
        if let Some(kind) = query.kind {
            select = select.filter(expenses::Column::Category.eq(kind.as_str()));
        }
        if query.only_mine() {
            select = select.filter(expenses::Column::ClaimantId.eq(caller));
        } else if let Some(claimant) = claimant {
            select = select.filter(expenses::Column::ClaimantId.eq(claimant));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(&[expenses::Column::Description], term));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches a claim.
    pub async fn find(&self, id: Uuid) -> Result<expenses::Model, FinanceError> {
        expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(FinanceError::NotFound(id))
    }

    /// Pending → Approved.
    pub async fn approve(
        &self,
        id: Uuid,
        decided_by: Uuid,
        notes: Option<String>,
    ) -> Result<expenses::Model, FinanceError> {
        let expense = self.find(id).await?;
        let next = ExpenseService::approve(status_of(&expense)?)?;
        self.decide(expense, next, decided_by, notes).await
    }

    /// Pending → Rejected.
    pub async fn reject(
        &self,
        id: Uuid,
        decided_by: Uuid,
        reason: String,
    ) -> Result<expenses::Model, FinanceError> {
        let expense = self.find(id).await?;
        let next = ExpenseService::reject(status_of(&expense)?)?;
        self.decide(expense, next, decided_by, Some(reason)).await
    }

    /// Approved → Reimbursed.
    pub async fn reimburse(&self, id: Uuid, paid_by: Uuid) -> Result<expenses::Model, FinanceError> {
        let expense = self.find(id).await?;
        let next = ExpenseService::reimburse(status_of(&expense)?)?;

        let now = Utc::now().into();
        let mut active: expenses::ActiveModel = expense.into();
        active.status = Set(next.as_str().to_string());
        active.reimbursed_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(expense_id = %id, paid_by = %paid_by, "Expense reimbursed");
        Ok(updated)
    }

    /// Pending → Cancelled, by the claimant.
    pub async fn cancel(&self, id: Uuid, actor: Uuid) -> Result<expenses::Model, FinanceError> {
        let expense = self.find(id).await?;
        let next = ExpenseService::cancel(status_of(&expense)?, expense.claimant_id, actor)?;

        let mut active: expenses::ActiveModel = expense.into();
        active.status = Set(next.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(expense_id = %id, "Expense cancelled");
        Ok(updated)
    }

    async fn decide(
        &self,
        expense: expenses::Model,
        next: ExpenseStatus,
        decided_by: Uuid,
        notes: Option<String>,
    ) -> Result<expenses::Model, FinanceError> {
        let id = expense.id;
        let now = Utc::now().into();
        let mut active: expenses::ActiveModel = expense.into();
        active.status = Set(next.as_str().to_string());
        active.decided_by = Set(Some(decided_by));
        active.decided_at = Set(Some(now));
        active.decision_notes = Set(notes);
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(expense_id = %id, status = %next, decided_by = %decided_by, "Expense decided");
        Ok(updated)
    }
}

pub(crate) fn status_of(expense: &expenses::Model) -> Result<ExpenseStatus, FinanceError> {
    decode(&expense.status).map_err(|e| FinanceError::Database(e.to_string()))
}
