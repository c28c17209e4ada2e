//! Expense claims.

pub mod error;
pub mod expense;
pub mod requests;

pub use error::FinanceError;
pub use expense::{ExpenseCategory, ExpenseService, ExpenseStatus};
pub use requests::{NewExpense, SubmitExpenseRequest};
