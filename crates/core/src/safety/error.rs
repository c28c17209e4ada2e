//! Safety error types.

use thiserror::Error;
use uuid::Uuid;

use super::incident::IncidentStatus;

/// Errors that can occur during incident operations.
#[derive(Debug, Error)]
pub enum SafetyError {
    /// Attempted an invalid status transition.
    #[error("Invalid incident status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: IncidentStatus,
        /// The attempted target status.
        to: IncidentStatus,
    },

    /// Incident not found.
    #[error("Incident {0} not found")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl SafetyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 409,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotFound(_) => "INCIDENT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
