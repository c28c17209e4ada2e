//! Procurement status enums.

use crate::macros::string_enum;

string_enum! {
    /// Requisition lifecycle.
    pub enum RequisitionStatus {
        /// Being drafted by the requester.
        Draft => "DRAFT",
        /// Awaiting approval.
        PendingApproval => "PENDING_APPROVAL",
        /// Approved, may be converted into a purchase order.
        Approved => "APPROVED",
        /// Rejected by an approver.
        Rejected => "REJECTED",
        /// A purchase order has been raised from it.
        Converted => "CONVERTED",
        /// Withdrawn.
        Cancelled => "CANCELLED",
    }
}

string_enum! {
    /// Purchase order lifecycle.
    pub enum PurchaseOrderStatus {
        /// Being drafted.
        Draft => "DRAFT",
        /// Awaiting approval.
        PendingApproval => "PENDING_APPROVAL",
        /// Approved and sent to the vendor.
        Approved => "APPROVED",
        /// Some goods accepted.
        PartiallyReceived => "PARTIALLY_RECEIVED",
        /// Every line fully accepted.
        Received => "RECEIVED",
        /// Invoice registered, match not yet run.
        MatchPending => "MATCH_PENDING",
        /// Invoices matched within tolerance.
        Matched => "MATCHED",
        /// An invoice is outside tolerance.
        Disputed => "DISPUTED",
        /// Every invoice paid.
        Paid => "PAID",
        /// Cancelled before anything was received.
        Cancelled => "CANCELLED",
    }
}

string_enum! {
    /// Three-way match result of a vendor invoice.
    pub enum MatchStatus {
        /// Registered, not yet matched.
        MatchPending => "MATCH_PENDING",
        /// Within tolerance (or overridden).
        Matched => "MATCHED",
        /// Outside tolerance.
        Disputed => "DISPUTED",
    }
}

string_enum! {
    /// Payment progress of a vendor invoice.
    pub enum PaymentStatus {
        /// Nothing paid.
        Unpaid => "UNPAID",
        /// Part of the total paid.
        PartiallyPaid => "PARTIALLY_PAID",
        /// Fully paid.
        Paid => "PAID",
    }
}

string_enum! {
    /// How a payment was made.
    pub enum PaymentMethod {
        /// Electronic funds transfer.
        Eft => "EFT",
        /// Cheque.
        Cheque => "CHEQUE",
        /// Cash.
        Cash => "CASH",
        /// Company card.
        Card => "CARD",
    }
}

impl PurchaseOrderStatus {
    /// Returns true once receiving is complete, i.e. `RECEIVED` or any later state.
    #[must_use]
    pub const fn is_receipt_complete(&self) -> bool {
        matches!(
            self,
            Self::Received | Self::MatchPending | Self::Matched | Self::Disputed | Self::Paid
        )
    }

    /// Returns true while goods may still be received.
    #[must_use]
    pub const fn accepts_receipts(&self) -> bool {
        matches!(self, Self::Approved | Self::PartiallyReceived)
    }

    /// Returns true while an invoice may be registered.
    #[must_use]
    pub const fn accepts_invoices(&self) -> bool {
        matches!(self, Self::PartiallyReceived | Self::Received)
    }
}

impl MatchStatus {
    /// Returns true when the match may be (re-)run.
    #[must_use]
    pub const fn can_rematch(&self) -> bool {
        matches!(self, Self::MatchPending | Self::Matched | Self::Disputed)
    }
}
