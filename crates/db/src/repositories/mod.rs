//! Repository abstractions for data access.
//!
//! One repository per vertical. Each loads the current row, asks the pure
//! service in `ridgeline-core` for the next state and persists it, so the
//! rules live in one place and the repositories stay thin.

pub mod approval_inbox;
pub mod document;
pub mod expense;
pub mod fleet;
pub mod goods_receipt;
pub mod incident;
pub mod inventory;
pub mod invoice;
pub mod leave;
pub mod procurement_report;
pub mod purchase_order;
pub mod requisition;
pub mod support;
pub mod task;
pub mod vendor;

pub use approval_inbox::ApprovalInboxRepository;
pub use document::{DocumentDetail, DocumentRepository};
pub use expense::ExpenseRepository;
pub use fleet::{FleetDocumentView, FleetRepository};
pub use goods_receipt::{GoodsReceiptDetail, GoodsReceiptRepository};
pub use incident::IncidentRepository;
pub use inventory::{InventoryRepository, StockItemDetail, StockItemView};
pub use invoice::{InvoiceDetail, InvoiceRepository, PaymentReceipt};
pub use leave::LeaveRepository;
pub use procurement_report::ProcurementReportRepository;
pub use purchase_order::{PurchaseOrderDetail, PurchaseOrderRepository};
pub use requisition::{RequisitionDetail, RequisitionRepository};
pub use task::TaskRepository;
pub use vendor::VendorRepository;
