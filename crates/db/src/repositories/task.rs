//! Task board repository.

use chrono::Utc;
use ridgeline_core::tasks::{NewTask, TaskError, TaskService, TaskStatus, TaskPriority};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::support::{decode, fetch_page, search_condition};
use crate::entities::tasks;

fn db_err(e: DbErr) -> TaskError {
    TaskError::Database(e.to_string())
}

/// Task persistence.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    db: DatabaseConnection,
}

impl TaskRepository {
    /// Creates a new task repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a task in `TODO`.
    pub async fn create(&self, created_by: Uuid, input: NewTask) -> Result<tasks::Model, TaskError> {
        let now = Utc::now().into();
        let task = tasks::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            description: Set(input.description),
            priority: Set(input.priority.as_str().to_string()),
            status: Set(TaskStatus::Todo.as_str().to_string()),
            created_by: Set(created_by),
            assignee_id: Set(input.assignee_id),
            due_date: Set(input.due_date),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(task_id = %task.id, assignee_id = ?task.assignee_id, "Task created");
        Ok(task)
    }

    /// Lists tasks. The `type` filter is the priority; `mine` means
    /// assigned to the caller.
    pub async fn list(
        &self,
        query: &ListQuery<TaskStatus, TaskPriority>,
        caller: Uuid,
    ) -> Result<PageResponse<tasks::Model>, TaskError> {
        let mut select = tasks::Entity::find()
            .order_by_asc(tasks::Column::DueDate)
            .order_by_desc(tasks::Column::CreatedAt);
        if let Some(status) = query.status {
            select = select.filter(tasks::Column::Status.eq(status.as_str()));
        }
        if let Some(priority) = query.kind {
            select = select.filter(tasks::Column::Priority.eq(priority.as_str()));
        }
        if query.only_mine() {
            select = select.filter(tasks::Column::AssigneeId.eq(caller));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[tasks::Column::Title, tasks::Column::Description],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches a task.
    pub async fn get(&self, id: Uuid) -> Result<tasks::Model, TaskError> {
        tasks::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(TaskError::NotFound(id))
    }

    /// Moves a task to `to` on behalf of its creator or assignee.
    pub async fn update_status(
        &self,
        id: Uuid,
        to: TaskStatus,
        actor: Uuid,
    ) -> Result<tasks::Model, TaskError> {
        let task = self.get(id).await?;
        let from: TaskStatus =
            decode(&task.status).map_err(|e| TaskError::Database(e.to_string()))?;
        let next = TaskService::transition(from, to, actor, task.created_by, task.assignee_id)?;

        let now = Utc::now().into();
        let mut active: tasks::ActiveModel = task.into();
        active.status = Set(next.as_str().to_string());
        active.completed_at = Set((next == TaskStatus::Done).then_some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(task_id = %id, from = %from, to = %next, "Task status changed");
        Ok(updated)
    }
}
