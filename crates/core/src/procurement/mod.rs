//! Procurement and three-way match.
//!
//! Requisition → purchase order → goods receipt → vendor invoice → payment.
//! Everything here is pure: repositories load the current state, ask these
//! functions what the next state is, and persist the answer.
//!
//! # Modules
//!
//! - `types` - Status enums and line snapshots
//! - `error` - Procurement error types
//! - `service` - Requisition and purchase order transitions
//! - `receiving` - Goods receipt planning (over-receipt guard)
//! - `matching` - Price/quantity variance and match status
//! - `payment` - Payment planning (over-payment guard)
//! - `metrics` - Compliance, match rate and cycle time
//! - `requests` - Request payloads and their validators

pub mod error;
pub mod matching;
pub mod metrics;
pub mod payment;
pub mod receiving;
pub mod requests;
pub mod service;
pub mod types;

#[cfg(test)]
mod matching_props;
#[cfg(test)]
mod payment_props;
#[cfg(test)]
mod receiving_props;

pub use error::ProcurementError;
pub use matching::{
    DEFAULT_TOLERANCE_PERCENT, LineVariance, MatchLine, MatchOutcome, MatchState, MatchingService,
    configured_tolerance, variance_percent,
};
pub use metrics::{CycleSample, ProcurementMetrics, ProcurementMetricsInput};
pub use payment::{PaymentPlan, PaymentService};
pub use receiving::{PoLineState, ReceiptLine, ReceiptPlan, ReceivingService};
pub use requests::{
    CreateGoodsReceiptRequest, CreateInvoiceRequest, CreatePurchaseOrderRequest,
    CreateRequisitionRequest, CreateVendorRequest, MatchInvoiceRequest, NewGoodsReceipt,
    NewInvoice, NewInvoiceLine, NewPurchaseOrder, NewPurchaseOrderLine, NewRequisition,
    NewRequisitionLine, NewVendor, OverrideMatchRequest, PaymentInput, RecordPaymentRequest,
};
pub use service::{PurchaseOrderService, RequisitionService};
pub use types::{
    MatchStatus, PaymentMethod, PaymentStatus, PurchaseOrderStatus, RequisitionStatus,
};
