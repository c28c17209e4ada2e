//! Approval inbox types and decision payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::macros::string_enum;
use crate::roles::Capability;
use crate::validation::{FieldErrors, MIN_REASON_LENGTH, Validate, ValidationErrors};

string_enum! {
    /// Kinds of record that pass through the approvals inbox.
    pub enum ApprovalKind {
        /// Purchase requisition.
        Requisition => "REQUISITION",
        /// Purchase order.
        PurchaseOrder => "PURCHASE_ORDER",
        /// Leave request.
        LeaveRequest => "LEAVE_REQUEST",
        /// Expense claim.
        Expense => "EXPENSE",
    }
}

impl ApprovalKind {
    /// Parses a path segment such as `purchase-orders` or `PURCHASE_ORDER`.
    #[must_use]
    pub fn from_path(segment: &str) -> Option<Self> {
        let normalized = segment.trim().replace('-', "_");
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        Self::parse(&normalized).or_else(|| Self::parse(singular))
    }

    /// Capability needed to approve or reject this kind.
    #[must_use]
    pub const fn required_capability(&self) -> Capability {
        match self {
            Self::Requisition | Self::PurchaseOrder => Capability::Approve,
            Self::LeaveRequest => Capability::ApproveLeave,
            Self::Expense => Capability::ApproveExpenses,
        }
    }
}

/// One pending item in the inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalItem {
    /// Kind of record.
    pub kind: ApprovalKind,
    /// Record id.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// User who raised the record.
    pub requested_by: Uuid,
    /// Monetary amount, where the record has one.
    pub amount: Option<Decimal>,
    /// Currency of `amount`.
    pub currency: Option<String>,
    /// When the record entered the pending state.
    pub submitted_at: DateTime<Utc>,
}

/// Payload for approve actions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApproveRequest {
    /// Optional approver notes.
    pub notes: Option<String>,
}

impl Validate for ApproveRequest {
    type Output = Option<String>;

    fn validate(self) -> Result<Option<String>, ValidationErrors> {
        Ok(FieldErrors::optional_text(self.notes.as_deref()))
    }
}

/// Payload carrying a mandatory reason (reject, cancel).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReasonRequest {
    /// Free-text reason.
    pub reason: Option<String>,
}

impl Validate for ReasonRequest {
    type Output = String;

    fn validate(self) -> Result<String, ValidationErrors> {
        let mut errs = FieldErrors::new();
        match errs.min_length("reason", self.reason.as_deref(), MIN_REASON_LENGTH) {
            Some(reason) => Ok(reason),
            None => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(ApprovalKind::from_path("purchase-orders"), Some(ApprovalKind::PurchaseOrder));
        assert_eq!(ApprovalKind::from_path("EXPENSE"), Some(ApprovalKind::Expense));
        assert_eq!(ApprovalKind::from_path("leave_requests"), Some(ApprovalKind::LeaveRequest));
        assert_eq!(ApprovalKind::from_path("requisition"), Some(ApprovalKind::Requisition));
        assert_eq!(ApprovalKind::from_path("timesheets"), None);
    }

    #[test]
    fn test_reason_min_length() {
        let errs = ReasonRequest {
            reason: Some("no".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("reason"), Some("min_length"));

        let ok = ReasonRequest {
            reason: Some(" Budget exhausted for Q3 ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok, "Budget exhausted for Q3");
    }

    #[test]
    fn test_missing_reason_is_required() {
        let errs = ReasonRequest::default().validate().unwrap_err();
        assert_eq!(errs.code_for("reason"), Some("required"));
    }
}
