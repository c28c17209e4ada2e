//! Task request payloads.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::types::{TaskPriority, TaskStatus};
use crate::validation::{FieldErrors, Validate, ValidationErrors};

const MAX_TITLE_LENGTH: usize = 200;

/// Payload for `POST /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Short title.
    pub title: Option<String>,
    /// Details.
    pub description: Option<String>,
    /// Priority, defaults to `MEDIUM`.
    pub priority: Option<String>,
    /// User the task is assigned to.
    pub assignee_id: Option<String>,
    /// Due date.
    pub due_date: Option<String>,
}

/// A validated new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Short title.
    pub title: String,
    /// Details.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

impl Validate for CreateTaskRequest {
    type Output = NewTask;

    fn validate(self) -> Result<NewTask, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let title = errs.required_text("title", self.title.as_deref());
        let title = title.and_then(|t| errs.max_length("title", Some(&t), MAX_TITLE_LENGTH));
        let priority = errs
            .optional_enum::<TaskPriority>("priority", self.priority.as_deref())
            .unwrap_or(TaskPriority::Medium);
        let assignee_id = errs.optional_uuid("assigneeId", self.assignee_id.as_deref());
        let due_date = errs.optional_date("dueDate", self.due_date.as_deref());

        match title {
            Some(title) if errs.is_empty() => Ok(NewTask {
                title,
                description: FieldErrors::optional_text(self.description.as_deref()),
                priority,
                assignee_id,
                due_date,
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskStatusRequest {
    /// Target status.
    pub status: Option<String>,
}

impl Validate for UpdateTaskStatusRequest {
    type Output = TaskStatus;

    fn validate(self) -> Result<TaskStatus, ValidationErrors> {
        let mut errs = FieldErrors::new();
        match errs.enum_value::<TaskStatus>("status", self.status.as_deref()) {
            Some(status) => Ok(status),
            None => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_priority() {
        let task = CreateTaskRequest {
            title: Some("  Inspect conveyor belt ".into()),
            ..CreateTaskRequest::default()
        }
        .validate()
        .unwrap();
        assert_eq!(task.title, "Inspect conveyor belt");
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_create_collects_all_errors() {
        let errs = CreateTaskRequest {
            title: None,
            priority: Some("urgent".into()),
            assignee_id: Some("nobody".into()),
            due_date: Some("tomorrow".into()),
            ..CreateTaskRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.errors().len(), 4);
        assert_eq!(errs.code_for("priority"), Some("enum"));
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        let status = UpdateTaskStatusRequest {
            status: Some("in_progress".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }
}
