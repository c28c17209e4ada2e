//! Finance error types.

use thiserror::Error;
use uuid::Uuid;

use super::expense::ExpenseStatus;

/// Errors that can occur during expense operations.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// Attempted an invalid status transition.
    #[error("Invalid expense status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ExpenseStatus,
        /// The attempted target status.
        to: ExpenseStatus,
    },

    /// Only the claimant may cancel.
    #[error("Only the claimant can cancel this expense")]
    NotClaimant,

    /// Expense not found.
    #[error("Expense {0} not found")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl FinanceError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 409,
            Self::NotClaimant => 403,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotClaimant => "NOT_CLAIMANT",
            Self::NotFound(_) => "EXPENSE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
