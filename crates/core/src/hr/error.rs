//! HR error types.

use thiserror::Error;
use uuid::Uuid;

use super::leave::LeaveStatus;

/// Errors that can occur during leave operations.
#[derive(Debug, Error)]
pub enum HrError {
    /// Attempted an invalid status transition.
    #[error("Invalid leave status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: LeaveStatus,
        /// The attempted target status.
        to: LeaveStatus,
    },

    /// Approved leave that has already started cannot be cancelled.
    #[error("Leave that has already started cannot be cancelled")]
    AlreadyStarted,

    /// Only the requester may cancel.
    #[error("Only the requester can cancel this leave request")]
    NotRequester,

    /// The new request overlaps an existing pending or approved one.
    #[error("Leave request overlaps an existing request")]
    Overlapping,

    /// Leave request not found.
    #[error("Leave request {0} not found")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl HrError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::AlreadyStarted | Self::Overlapping => 409,
            Self::NotRequester => 403,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AlreadyStarted => "LEAVE_ALREADY_STARTED",
            Self::NotRequester => "NOT_REQUESTER",
            Self::Overlapping => "LEAVE_OVERLAP",
            Self::NotFound(_) => "LEAVE_REQUEST_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
