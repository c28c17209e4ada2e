//! `SeaORM` entity definitions.
//!
//! Status and type columns are plain strings constrained in the schema and
//! parsed into the `ridgeline-core` enums at the repository boundary.

pub mod documents;
pub mod expenses;
pub mod fleet_costs;
pub mod fleet_documents;
pub mod goods_receipt_lines;
pub mod goods_receipts;
pub mod leave_requests;
pub mod ocr_jobs;
pub mod payments;
pub mod purchase_order_lines;
pub mod purchase_orders;
pub mod requisition_lines;
pub mod requisitions;
pub mod safety_incidents;
pub mod stock_items;
pub mod stock_levels;
pub mod stock_movements;
pub mod tasks;
pub mod vehicles;
pub mod vendor_invoice_lines;
pub mod vendor_invoices;
pub mod vendors;
pub mod warehouses;
