//! Task error types.

use thiserror::Error;
use uuid::Uuid;

use super::types::TaskStatus;

/// Errors that can occur during task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Attempted an invalid status transition.
    #[error("Invalid task status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: TaskStatus,
        /// The attempted target status.
        to: TaskStatus,
    },

    /// Only the creator or assignee may move a task.
    #[error("Only the creator or assignee can update this task")]
    NotParticipant,

    /// Task not found.
    #[error("Task {0} not found")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl TaskError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 409,
            Self::NotParticipant => 403,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotParticipant => "NOT_TASK_PARTICIPANT",
            Self::NotFound(_) => "TASK_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
