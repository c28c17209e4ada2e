//! Procurement error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::{MatchStatus, PaymentStatus, PurchaseOrderStatus, RequisitionStatus};

/// Errors that can occur during procurement operations.
#[derive(Debug, Error)]
pub enum ProcurementError {
    /// Invalid requisition status transition.
    #[error("Invalid requisition status transition from {from} to {to}")]
    InvalidRequisitionTransition {
        /// The current status.
        from: RequisitionStatus,
        /// The attempted target status.
        to: RequisitionStatus,
    },

    /// Invalid purchase order status transition.
    #[error("Invalid purchase order status transition from {from} to {to}")]
    InvalidPurchaseOrderTransition {
        /// The current status.
        from: PurchaseOrderStatus,
        /// The attempted target status.
        to: PurchaseOrderStatus,
    },

    /// Goods can only be received against approved or partially received orders.
    #[error("Cannot receive goods against a purchase order in status {0}")]
    NotReceivable(PurchaseOrderStatus),

    /// Invoices can only be registered against received orders.
    #[error("Cannot register an invoice against a purchase order in status {0}")]
    NotInvoiceable(PurchaseOrderStatus),

    /// A receipt or invoice line references a line outside the order.
    #[error("Line {0} does not belong to this purchase order")]
    UnknownOrderLine(Uuid),

    /// Cumulative accepted quantity would exceed the ordered quantity.
    #[error(
        "Over-receipt on line {line_id}: ordered {ordered}, already accepted {already_accepted}, attempted {attempted}"
    )]
    OverReceipt {
        /// Purchase order line.
        line_id: Uuid,
        /// Ordered quantity.
        ordered: Decimal,
        /// Quantity accepted by earlier receipts.
        already_accepted: Decimal,
        /// Quantity this receipt tried to accept.
        attempted: Decimal,
    },

    /// The order has receipts and can no longer be cancelled.
    #[error("Cannot cancel a purchase order that has received goods")]
    AlreadyReceived,

    /// Matching is not allowed in the invoice's current state.
    #[error("Cannot run the match for an invoice in status {0}")]
    NotMatchable(MatchStatus),

    /// The match is frozen once payment has started.
    #[error("Cannot re-run the match once payment has started (payment status {0})")]
    PaymentStarted(PaymentStatus),

    /// The match was settled by manual override.
    #[error("Invoice was accepted by manual override and cannot be re-matched")]
    MatchOverridden,

    /// Only disputed invoices can be overridden.
    #[error("Only disputed invoices can be overridden (current status {0})")]
    NotDisputed(MatchStatus),

    /// Payment requires a matched invoice.
    #[error("Invoice must be MATCHED before payment (current status {0})")]
    NotMatched(MatchStatus),

    /// Invoice already fully paid.
    #[error("Invoice is already {0}")]
    AlreadyPaid(PaymentStatus),

    /// Payment would exceed the outstanding amount.
    #[error("Payment of {attempted} exceeds the remaining balance of {remaining}")]
    Overpayment {
        /// Outstanding amount.
        remaining: Decimal,
        /// Amount attempted.
        attempted: Decimal,
    },

    /// Requisition must be approved before conversion.
    #[error("Requisition must be APPROVED to raise a purchase order (current status {0})")]
    RequisitionNotApproved(RequisitionStatus),

    /// Invoice number already registered for this vendor.
    #[error("Invoice {0} is already registered for this vendor")]
    DuplicateInvoice(String),

    /// Vendor code already in use.
    #[error("Vendor code {0} already exists")]
    DuplicateVendorCode(String),

    /// Vendor is inactive.
    #[error("Vendor {0} is inactive")]
    InactiveVendor(Uuid),

    /// Requisition not found.
    #[error("Requisition {0} not found")]
    RequisitionNotFound(Uuid),

    /// Purchase order not found.
    #[error("Purchase order {0} not found")]
    PurchaseOrderNotFound(Uuid),

    /// Invoice not found.
    #[error("Invoice {0} not found")]
    InvoiceNotFound(Uuid),

    /// Vendor not found.
    #[error("Vendor {0} not found")]
    VendorNotFound(Uuid),

    /// Delivery warehouse not found.
    #[error("Warehouse {0} not found")]
    WarehouseNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ProcurementError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequisitionTransition { .. }
            | Self::InvalidPurchaseOrderTransition { .. }
            | Self::NotReceivable(_)
            | Self::NotInvoiceable(_)
            | Self::AlreadyReceived
            | Self::NotMatchable(_)
            | Self::PaymentStarted(_)
            | Self::MatchOverridden
            | Self::NotDisputed(_)
            | Self::NotMatched(_)
            | Self::AlreadyPaid(_)
            | Self::RequisitionNotApproved(_)
            | Self::DuplicateInvoice(_)
            | Self::DuplicateVendorCode(_) => 409,

            Self::UnknownOrderLine(_)
            | Self::OverReceipt { .. }
            | Self::Overpayment { .. }
            | Self::InactiveVendor(_) => 422,

            Self::RequisitionNotFound(_)
            | Self::PurchaseOrderNotFound(_)
            | Self::InvoiceNotFound(_)
            | Self::VendorNotFound(_)
            | Self::WarehouseNotFound(_) => 404,

            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequisitionTransition { .. }
            | Self::InvalidPurchaseOrderTransition { .. } => "INVALID_TRANSITION",
            Self::NotReceivable(_) => "PO_NOT_RECEIVABLE",
            Self::NotInvoiceable(_) => "PO_NOT_INVOICEABLE",
            Self::UnknownOrderLine(_) => "UNKNOWN_ORDER_LINE",
            Self::OverReceipt { .. } => "OVER_RECEIPT",
            Self::AlreadyReceived => "ALREADY_RECEIVED",
            Self::NotMatchable(_) => "INVOICE_NOT_MATCHABLE",
            Self::PaymentStarted(_) => "INVOICE_PAYMENT_STARTED",
            Self::MatchOverridden => "INVOICE_OVERRIDDEN",
            Self::NotDisputed(_) => "INVOICE_NOT_DISPUTED",
            Self::NotMatched(_) => "INVOICE_NOT_MATCHED",
            Self::AlreadyPaid(_) => "INVOICE_ALREADY_PAID",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::RequisitionNotApproved(_) => "REQUISITION_NOT_APPROVED",
            Self::DuplicateInvoice(_) => "DUPLICATE_INVOICE",
            Self::DuplicateVendorCode(_) => "DUPLICATE_VENDOR_CODE",
            Self::InactiveVendor(_) => "INACTIVE_VENDOR",
            Self::RequisitionNotFound(_) => "REQUISITION_NOT_FOUND",
            Self::PurchaseOrderNotFound(_) => "PURCHASE_ORDER_NOT_FOUND",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::VendorNotFound(_) => "VENDOR_NOT_FOUND",
            Self::WarehouseNotFound(_) => "WAREHOUSE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_over_receipt_error() {
        let err = ProcurementError::OverReceipt {
            line_id: Uuid::nil(),
            ordered: dec!(100),
            already_accepted: dec!(90),
            attempted: dec!(20),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "OVER_RECEIPT");
        assert!(err.to_string().contains("ordered 100"));
    }

    #[test]
    fn test_transition_error_names_states() {
        let err = ProcurementError::InvalidPurchaseOrderTransition {
            from: PurchaseOrderStatus::Paid,
            to: PurchaseOrderStatus::Cancelled,
        };
        assert_eq!(err.status_code(), 409);
        assert!(err.to_string().contains("PAID"));
        assert!(err.to_string().contains("CANCELLED"));
    }

    #[test]
    fn test_not_found_errors() {
        assert_eq!(ProcurementError::InvoiceNotFound(Uuid::nil()).status_code(), 404);
        assert_eq!(ProcurementError::VendorNotFound(Uuid::nil()).error_code(), "VENDOR_NOT_FOUND");
    }

    #[test]
    fn test_overpayment_error() {
        let err = ProcurementError::Overpayment {
            remaining: dec!(50),
            attempted: dec!(60),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "OVERPAYMENT");
    }
}
