//! Requisition and purchase order status transitions.

use super::error::ProcurementError;
use super::types::{MatchStatus, PaymentStatus, PurchaseOrderStatus, RequisitionStatus};

/// Stateless service for requisition transitions.
pub struct RequisitionService;

impl RequisitionService {
    fn require(
        from: RequisitionStatus,
        to: RequisitionStatus,
        allowed: &[RequisitionStatus],
    ) -> Result<RequisitionStatus, ProcurementError> {
        if allowed.contains(&from) {
            Ok(to)
        } else {
            Err(ProcurementError::InvalidRequisitionTransition { from, to })
        }
    }

    /// Draft → PendingApproval.
    pub fn submit(current: RequisitionStatus) -> Result<RequisitionStatus, ProcurementError> {
        Self::require(
            current,
            RequisitionStatus::PendingApproval,
            &[RequisitionStatus::Draft],
        )
    }

    /// PendingApproval → Approved.
    pub fn approve(current: RequisitionStatus) -> Result<RequisitionStatus, ProcurementError> {
        Self::require(
            current,
            RequisitionStatus::Approved,
            &[RequisitionStatus::PendingApproval],
        )
    }

    /// PendingApproval → Rejected.
    pub fn reject(current: RequisitionStatus) -> Result<RequisitionStatus, ProcurementError> {
        Self::require(
            current,
            RequisitionStatus::Rejected,
            &[RequisitionStatus::PendingApproval],
        )
    }

    /// Draft | PendingApproval | Approved → Cancelled.
    pub fn cancel(current: RequisitionStatus) -> Result<RequisitionStatus, ProcurementError> {
        Self::require(
            current,
            RequisitionStatus::Cancelled,
            &[
                RequisitionStatus::Draft,
                RequisitionStatus::PendingApproval,
                RequisitionStatus::Approved,
            ],
        )
    }

    /// Approved → Converted, when a purchase order is raised from it.
    pub fn convert(current: RequisitionStatus) -> Result<RequisitionStatus, ProcurementError> {
        if current == RequisitionStatus::Approved {
            Ok(RequisitionStatus::Converted)
        } else {
            Err(ProcurementError::RequisitionNotApproved(current))
        }
    }
}

/// Stateless service for purchase order transitions.
///
/// Receipt, match and payment driven states are computed by
/// [`super::ReceivingService`], [`Self::status_from_invoices`] and
/// [`Self::status_after_payment`].
pub struct PurchaseOrderService;

impl PurchaseOrderService {
    fn require(
        from: PurchaseOrderStatus,
        to: PurchaseOrderStatus,
        allowed: &[PurchaseOrderStatus],
    ) -> Result<PurchaseOrderStatus, ProcurementError> {
        if allowed.contains(&from) {
            Ok(to)
        } else {
            Err(ProcurementError::InvalidPurchaseOrderTransition { from, to })
        }
    }

    /// Draft → PendingApproval.
    pub fn submit(current: PurchaseOrderStatus) -> Result<PurchaseOrderStatus, ProcurementError> {
        Self::require(
            current,
            PurchaseOrderStatus::PendingApproval,
            &[PurchaseOrderStatus::Draft],
        )
    }

    /// PendingApproval → Approved.
    pub fn approve(current: PurchaseOrderStatus) -> Result<PurchaseOrderStatus, ProcurementError> {
        Self::require(
            current,
            PurchaseOrderStatus::Approved,
            &[PurchaseOrderStatus::PendingApproval],
        )
    }

    /// PendingApproval → Draft. The reason is validated by the caller.
    pub fn reject(current: PurchaseOrderStatus) -> Result<PurchaseOrderStatus, ProcurementError> {
        Self::require(
            current,
            PurchaseOrderStatus::Draft,
            &[PurchaseOrderStatus::PendingApproval],
        )
    }

    /// Draft | PendingApproval | Approved → Cancelled, provided nothing was received.
    pub fn cancel(
        current: PurchaseOrderStatus,
        has_receipts: bool,
    ) -> Result<PurchaseOrderStatus, ProcurementError> {
        let next = Self::require(
            current,
            PurchaseOrderStatus::Cancelled,
            &[
                PurchaseOrderStatus::Draft,
                PurchaseOrderStatus::PendingApproval,
                PurchaseOrderStatus::Approved,
            ],
        )?;
        if has_receipts {
            return Err(ProcurementError::AlreadyReceived);
        }
        Ok(next)
    }

    /// PartiallyReceived | Received → MatchPending, on invoice registration.
    pub fn register_invoice(
        current: PurchaseOrderStatus,
    ) -> Result<PurchaseOrderStatus, ProcurementError> {
        if current.accepts_invoices() {
            Ok(PurchaseOrderStatus::MatchPending)
        } else {
            Err(ProcurementError::NotInvoiceable(current))
        }
    }

    /// Derives the order status from the match status of its invoices.
    ///
    /// Any disputed invoice disputes the order; the order is matched only
    /// when every invoice is.
    #[must_use]
    pub fn status_from_invoices(statuses: &[MatchStatus]) -> PurchaseOrderStatus {
        if statuses.contains(&MatchStatus::Disputed) {
            PurchaseOrderStatus::Disputed
        } else if !statuses.is_empty() && statuses.iter().all(|s| *s == MatchStatus::Matched) {
            PurchaseOrderStatus::Matched
        } else {
            PurchaseOrderStatus::MatchPending
        }
    }

    /// Returns `Paid` once every invoice of the order is paid, else `current`.
    #[must_use]
    pub fn status_after_payment(
        current: PurchaseOrderStatus,
        invoice_payments: &[PaymentStatus],
    ) -> PurchaseOrderStatus {
        if !invoice_payments.is_empty() && invoice_payments.iter().all(|s| *s == PaymentStatus::Paid)
        {
            PurchaseOrderStatus::Paid
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_requisition_happy_path() {
        let s = RequisitionService::submit(RequisitionStatus::Draft).unwrap();
        let s = RequisitionService::approve(s).unwrap();
        assert_eq!(RequisitionService::convert(s).unwrap(), RequisitionStatus::Converted);
    }

    #[test]
    fn test_requisition_convert_requires_approval() {
        let err = RequisitionService::convert(RequisitionStatus::PendingApproval).unwrap_err();
        assert_eq!(err.error_code(), "REQUISITION_NOT_APPROVED");
    }

    #[rstest]
    #[case(RequisitionStatus::Converted)]
    #[case(RequisitionStatus::Rejected)]
    #[case(RequisitionStatus::Cancelled)]
    fn test_requisition_cancel_from_terminal_fails(#[case] from: RequisitionStatus) {
        assert!(RequisitionService::cancel(from).is_err());
    }

    #[test]
    fn test_po_reject_returns_to_draft() {
        assert_eq!(
            PurchaseOrderService::reject(PurchaseOrderStatus::PendingApproval).unwrap(),
            PurchaseOrderStatus::Draft
        );
        assert!(PurchaseOrderService::reject(PurchaseOrderStatus::Approved).is_err());
    }

    #[test]
    fn test_po_cancel_rules() {
        assert_eq!(
            PurchaseOrderService::cancel(PurchaseOrderStatus::Approved, false).unwrap(),
            PurchaseOrderStatus::Cancelled
        );
        assert!(matches!(
            PurchaseOrderService::cancel(PurchaseOrderStatus::Approved, true),
            Err(ProcurementError::AlreadyReceived)
        ));
        assert!(matches!(
            PurchaseOrderService::cancel(PurchaseOrderStatus::PartiallyReceived, false),
            Err(ProcurementError::InvalidPurchaseOrderTransition { .. })
        ));
    }

    #[rstest]
    #[case(PurchaseOrderStatus::PartiallyReceived, true)]
    #[case(PurchaseOrderStatus::Received, true)]
    #[case(PurchaseOrderStatus::Approved, false)]
    #[case(PurchaseOrderStatus::MatchPending, false)]
    fn test_register_invoice(#[case] from: PurchaseOrderStatus, #[case] ok: bool) {
        assert_eq!(PurchaseOrderService::register_invoice(from).is_ok(), ok);
    }

    #[test]
    fn test_status_from_invoices() {
        use MatchStatus::{Disputed, MatchPending, Matched};
        assert_eq!(
            PurchaseOrderService::status_from_invoices(&[Matched, Matched]),
            PurchaseOrderStatus::Matched
        );
        assert_eq!(
            PurchaseOrderService::status_from_invoices(&[Matched, Disputed]),
            PurchaseOrderStatus::Disputed
        );
        assert_eq!(
            PurchaseOrderService::status_from_invoices(&[Matched, MatchPending]),
            PurchaseOrderStatus::MatchPending
        );
    }

    #[test]
    fn test_status_after_payment() {
        use PaymentStatus::{Paid, PartiallyPaid};
        assert_eq!(
            PurchaseOrderService::status_after_payment(PurchaseOrderStatus::Matched, &[Paid]),
            PurchaseOrderStatus::Paid
        );
        assert_eq!(
            PurchaseOrderService::status_after_payment(
                PurchaseOrderStatus::Matched,
                &[Paid, PartiallyPaid]
            ),
            PurchaseOrderStatus::Matched
        );
    }
}
