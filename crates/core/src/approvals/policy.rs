//! Who may decide on a pending item.

use thiserror::Error;
use uuid::Uuid;

use super::types::ApprovalKind;
use crate::roles::{Capability, RoleAccess};

/// Errors raised before an approval decision reaches its vertical.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// The caller's role lacks the capability for this kind.
    #[error("Approving {kind} requires the {capability} capability")]
    MissingCapability {
        /// The kind being decided on.
        kind: ApprovalKind,
        /// The capability required.
        capability: Capability,
    },

    /// Requesters cannot decide on their own items.
    #[error("You cannot approve or reject your own {0}")]
    SelfApproval(ApprovalKind),

    /// Unrecognized kind in the request path.
    #[error("Unknown approval kind: {0}")]
    UnknownKind(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ApprovalError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCapability { .. } | Self::SelfApproval(_) => 403,
            Self::UnknownKind(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCapability { .. } => "MISSING_CAPABILITY",
            Self::SelfApproval(_) => "SELF_APPROVAL",
            Self::UnknownKind(_) => "UNKNOWN_APPROVAL_KIND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Stateless checks applied to every approve/reject call.
pub struct ApprovalPolicy;

impl ApprovalPolicy {
    /// Parses the kind from a request path segment.
    pub fn kind(segment: &str) -> Result<ApprovalKind, ApprovalError> {
        ApprovalKind::from_path(segment).ok_or_else(|| ApprovalError::UnknownKind(segment.to_string()))
    }

    /// Ensures the caller holds the capability for `kind`.
    pub fn authorize(access: &RoleAccess, kind: ApprovalKind) -> Result<(), ApprovalError> {
        let capability = kind.required_capability();
        if access.can(capability) {
            Ok(())
        } else {
            Err(ApprovalError::MissingCapability { kind, capability })
        }
    }

    /// Ensures the decider is not the requester.
    pub fn ensure_not_requester(
        kind: ApprovalKind,
        requested_by: Uuid,
        decided_by: Uuid,
    ) -> Result<(), ApprovalError> {
        if requested_by == decided_by {
            Err(ApprovalError::SelfApproval(kind))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::resolve;

    #[test]
    fn test_hr_officer_can_decide_leave_only() {
        let access = resolve("HR_OFFICER");
        assert!(ApprovalPolicy::authorize(&access, ApprovalKind::LeaveRequest).is_ok());
        let err = ApprovalPolicy::authorize(&access, ApprovalKind::PurchaseOrder).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(err.to_string().contains("canApprove"));
    }

    #[test]
    fn test_accountant_decides_expenses() {
        let access = resolve("ACCOUNTANT");
        assert!(ApprovalPolicy::authorize(&access, ApprovalKind::Expense).is_ok());
        assert!(ApprovalPolicy::authorize(&access, ApprovalKind::Requisition).is_err());
    }

    #[test]
    fn test_self_approval_rejected() {
        let me = Uuid::new_v4();
        let err = ApprovalPolicy::ensure_not_requester(ApprovalKind::Expense, me, me).unwrap_err();
        assert_eq!(err.error_code(), "SELF_APPROVAL");
        assert!(ApprovalPolicy::ensure_not_requester(ApprovalKind::Expense, me, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_unknown_kind() {
        let err = ApprovalPolicy::kind("timesheets").unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
