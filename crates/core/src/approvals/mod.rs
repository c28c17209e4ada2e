//! Cross-vertical approvals inbox.
//!
//! Pending requisitions, purchase orders, leave requests and expenses are
//! surfaced in one list. Decisions are dispatched back to the owning vertical
//! after [`ApprovalPolicy`] has checked the caller may decide on that kind.

mod policy;
mod types;

pub use policy::{ApprovalError, ApprovalPolicy};
pub use types::{ApprovalItem, ApprovalKind, ApproveRequest, ReasonRequest};
