//! Expense types and transitions.

use uuid::Uuid;

use super::error::FinanceError;
use crate::macros::string_enum;

string_enum! {
    /// Expense category.
    pub enum ExpenseCategory {
        /// Flights, mileage, tolls.
        Travel => "TRAVEL",
        /// Lodging.
        Accommodation => "ACCOMMODATION",
        /// Meals.
        Meals => "MEALS",
        /// Fuel for private vehicles on company business.
        Fuel => "FUEL",
        /// Small purchases.
        Supplies => "SUPPLIES",
        /// Courses and certification.
        Training => "TRAINING",
        /// Anything else.
        Other => "OTHER",
    }
}

string_enum! {
    /// Expense claim lifecycle.
    pub enum ExpenseStatus {
        /// Awaiting a decision.
        Pending => "PENDING",
        /// Approved for reimbursement.
        Approved => "APPROVED",
        /// Rejected.
        Rejected => "REJECTED",
        /// Paid back to the claimant.
        Reimbursed => "REIMBURSED",
        /// Withdrawn by the claimant.
        Cancelled => "CANCELLED",
    }
}

/// Stateless expense transitions.
pub struct ExpenseService;

impl ExpenseService {
    fn require(
        current: ExpenseStatus,
        expected: ExpenseStatus,
        to: ExpenseStatus,
    ) -> Result<ExpenseStatus, FinanceError> {
        if current == expected {
            Ok(to)
        } else {
            Err(FinanceError::InvalidTransition { from: current, to })
        }
    }

    /// Pending → Approved.
    pub fn approve(current: ExpenseStatus) -> Result<ExpenseStatus, FinanceError> {
        Self::require(current, ExpenseStatus::Pending, ExpenseStatus::Approved)
    }

    /// Pending → Rejected.
    pub fn reject(current: ExpenseStatus) -> Result<ExpenseStatus, FinanceError> {
        Self::require(current, ExpenseStatus::Pending, ExpenseStatus::Rejected)
    }

    /// Approved → Reimbursed.
    pub fn reimburse(current: ExpenseStatus) -> Result<ExpenseStatus, FinanceError> {
        Self::require(current, ExpenseStatus::Approved, ExpenseStatus::Reimbursed)
    }

    /// Pending → Cancelled, by the claimant only.
    pub fn cancel(
        current: ExpenseStatus,
        claimant: Uuid,
        actor: Uuid,
    ) -> Result<ExpenseStatus, FinanceError> {
        if claimant != actor {
            return Err(FinanceError::NotClaimant);
        }
        Self::require(current, ExpenseStatus::Pending, ExpenseStatus::Cancelled)
    }
}
