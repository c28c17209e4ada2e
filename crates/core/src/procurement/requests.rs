//! Procurement request payloads and their validators.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use uuid::Uuid;

use super::receiving::ReceiptLine;
use super::types::PaymentMethod;
use crate::validation::{
    FieldErrors, LooseValue, MIN_NARRATIVE_LENGTH, MIN_REASON_LENGTH, Validate, ValidationErrors,
};

/// Currency used when a purchase order does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

const MAX_NAME_LENGTH: usize = 200;

fn line_total(errs: &mut FieldErrors, field: &str, qty: Decimal, price: Decimal) -> Option<Decimal> {
    match qty.checked_mul(price) {
        Some(total) => Some(total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
        None => {
            errs.add(field, "overflow", format!("{field} is too large"));
            None
        }
    }
}

fn sum(errs: &mut FieldErrors, field: &str, amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        match total.checked_add(amount) {
            Some(t) => total = t,
            None => {
                errs.add(field, "overflow", format!("{field} is too large"));
                return Decimal::ZERO;
            }
        }
    }
    total
}

// ---------------------------------------------------------------------------
// Vendors
// ---------------------------------------------------------------------------

/// Payload for `POST /procurement/vendors`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendorRequest {
    /// Trading name.
    pub name: Option<String>,
    /// Short unique code.
    pub code: Option<String>,
    /// Accounts contact.
    pub contact_email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

/// A validated vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendor {
    /// Trading name.
    pub name: String,
    /// Upper-cased code.
    pub code: String,
    /// Accounts contact.
    pub contact_email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

impl Validate for CreateVendorRequest {
    type Output = NewVendor;

    fn validate(self) -> Result<NewVendor, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let name = errs
            .required_text("name", self.name.as_deref())
            .and_then(|n| errs.max_length("name", Some(&n), MAX_NAME_LENGTH));
        let code = errs.required_text("code", self.code.as_deref());
        let contact_email = FieldErrors::optional_text(self.contact_email.as_deref());
        if let Some(email) = &contact_email
            && !email.contains('@')
        {
            errs.add("contactEmail", "email", "contactEmail must be an email address");
        }

        match (name, code) {
            (Some(name), Some(code)) if errs.is_empty() => Ok(NewVendor {
                name,
                code: code.to_ascii_uppercase(),
                contact_email,
                phone: FieldErrors::optional_text(self.phone.as_deref()),
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

// ---------------------------------------------------------------------------
// Requisitions
// ---------------------------------------------------------------------------

/// Payload for `POST /procurement/requisitions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequisitionRequest {
    /// Short title.
    pub title: Option<String>,
    /// Business justification.
    pub justification: Option<String>,
    /// Requesting department.
    pub department: Option<String>,
    /// Date the goods are needed by.
    pub needed_by: Option<String>,
    /// Requested items.
    pub lines: Option<Vec<RequisitionLineRequest>>,
}

/// One requested item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionLineRequest {
    /// What is needed.
    pub description: Option<String>,
    /// Linked stock item.
    pub stock_item_id: Option<String>,
    /// Quantity.
    pub quantity: Option<LooseValue>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Estimated unit price.
    pub estimated_unit_price: Option<LooseValue>,
}

/// A validated requisition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequisitionLine {
    /// What is needed.
    pub description: String,
    /// Linked stock item.
    pub stock_item_id: Option<Uuid>,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Estimated unit price.
    pub estimated_unit_price: Option<Decimal>,
}

/// A validated requisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequisition {
    /// Short title.
    pub title: String,
    /// Business justification.
    pub justification: String,
    /// Requesting department.
    pub department: String,
    /// Date needed by.
    pub needed_by: Option<NaiveDate>,
    /// Requested items.
    pub lines: Vec<NewRequisitionLine>,
    /// Sum of estimated line totals.
    pub estimated_total: Decimal,
}

impl Validate for RequisitionLineRequest {
    type Output = NewRequisitionLine;

    fn validate(self) -> Result<NewRequisitionLine, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let description = errs.required_text("description", self.description.as_deref());
        let stock_item_id = errs.optional_uuid("stockItemId", self.stock_item_id.as_deref());
        let quantity = errs.positive_decimal("quantity", self.quantity.as_ref());
        let estimated_unit_price = self
            .estimated_unit_price
            .as_ref()
            .and_then(|p| errs.non_negative_decimal("estimatedUnitPrice", Some(p)));

        match (description, quantity) {
            (Some(description), Some(quantity)) if errs.is_empty() => Ok(NewRequisitionLine {
                description,
                stock_item_id,
                quantity,
                unit: FieldErrors::optional_text(self.unit.as_deref()),
                estimated_unit_price,
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

impl Validate for CreateRequisitionRequest {
    type Output = NewRequisition;

    fn validate(self) -> Result<NewRequisition, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let title = errs.required_text("title", self.title.as_deref());
        let justification =
            errs.min_length("justification", self.justification.as_deref(), MIN_REASON_LENGTH);
        let department = errs.required_text("department", self.department.as_deref());
        let needed_by = errs.optional_date("neededBy", self.needed_by.as_deref());
        let lines = errs.nested_list("lines", self.lines);

        let estimated_total = match &lines {
            Some(lines) => {
                let mut totals = Vec::with_capacity(lines.len());
                for (i, l) in lines.iter().enumerate() {
                    if let Some(price) = l.estimated_unit_price
                        && let Some(t) = line_total(&mut errs, &format!("lines[{i}].estimatedUnitPrice"), l.quantity, price)
                    {
                        totals.push(t);
                    }
                }
                sum(&mut errs, "lines", totals)
            }
            None => Decimal::ZERO,
        };

        match (title, justification, department, lines) {
            (Some(title), Some(justification), Some(department), Some(lines))
                if errs.is_empty() =>
            {
                Ok(NewRequisition {
                    title,
                    justification,
                    department,
                    needed_by,
                    lines,
                    estimated_total,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

// ---------------------------------------------------------------------------
// Purchase orders
// ---------------------------------------------------------------------------

/// Payload for `POST /procurement/purchase-orders`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderRequest {
    /// Supplying vendor.
    pub vendor_id: Option<String>,
    /// Approved requisition this order fulfils.
    pub requisition_id: Option<String>,
    /// Delivery warehouse.
    pub warehouse_id: Option<String>,
    /// Currency code, defaults to USD.
    pub currency: Option<String>,
    /// Expected delivery date.
    pub expected_delivery_date: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Ordered items.
    pub lines: Option<Vec<PurchaseOrderLineRequest>>,
}

/// One ordered item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLineRequest {
    /// Item description.
    pub description: Option<String>,
    /// Linked stock item; receipts against it post stock movements.
    pub stock_item_id: Option<String>,
    /// Ordered quantity.
    pub quantity: Option<LooseValue>,
    /// Agreed unit price.
    pub unit_price: Option<LooseValue>,
}

/// A validated order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrderLine {
    /// Item description.
    pub description: String,
    /// Linked stock item.
    pub stock_item_id: Option<Uuid>,
    /// Ordered quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
    /// `quantity × unit_price`, 2 dp.
    pub line_total: Decimal,
}

/// A validated purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrder {
    /// Vendor.
    pub vendor_id: Uuid,
    /// Source requisition.
    pub requisition_id: Option<Uuid>,
    /// Delivery warehouse.
    pub warehouse_id: Uuid,
    /// Currency code.
    pub currency: String,
    /// Expected delivery date.
    pub expected_delivery_date: Option<NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
    /// Lines.
    pub lines: Vec<NewPurchaseOrderLine>,
    /// Sum of line totals.
    pub total_amount: Decimal,
}

impl Validate for PurchaseOrderLineRequest {
    type Output = NewPurchaseOrderLine;

    fn validate(self) -> Result<NewPurchaseOrderLine, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let description = errs.required_text("description", self.description.as_deref());
        let stock_item_id = errs.optional_uuid("stockItemId", self.stock_item_id.as_deref());
        let quantity = errs.positive_decimal("quantity", self.quantity.as_ref());
        let unit_price = errs.non_negative_decimal("unitPrice", self.unit_price.as_ref());
        let total = match (quantity, unit_price) {
            (Some(q), Some(p)) => line_total(&mut errs, "unitPrice", q, p),
            _ => None,
        };

        match (description, quantity, unit_price, total) {
            (Some(description), Some(quantity), Some(unit_price), Some(line_total))
                if errs.is_empty() =>
            {
                Ok(NewPurchaseOrderLine {
                    description,
                    stock_item_id,
                    quantity,
                    unit_price,
                    line_total,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

impl Validate for CreatePurchaseOrderRequest {
    type Output = NewPurchaseOrder;

    fn validate(self) -> Result<NewPurchaseOrder, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let vendor_id = errs.uuid("vendorId", self.vendor_id.as_deref());
        let requisition_id = errs.optional_uuid("requisitionId", self.requisition_id.as_deref());
        let warehouse_id = errs.uuid("warehouseId", self.warehouse_id.as_deref());
        let currency = if FieldErrors::optional_text(self.currency.as_deref()).is_some() {
            errs.currency("currency", self.currency.as_deref())
        } else {
            Some(DEFAULT_CURRENCY.to_string())
        };
        let expected_delivery_date =
            errs.optional_date("expectedDeliveryDate", self.expected_delivery_date.as_deref());
        let lines = errs.nested_list("lines", self.lines);
        let total_amount = match &lines {
            Some(lines) => sum(&mut errs, "lines", lines.iter().map(|l| l.line_total)),
            None => Decimal::ZERO,
        };

        match (vendor_id, warehouse_id, currency, lines) {
            (Some(vendor_id), Some(warehouse_id), Some(currency), Some(lines))
                if errs.is_empty() =>
            {
                Ok(NewPurchaseOrder {
                    vendor_id,
                    requisition_id,
                    warehouse_id,
                    currency,
                    expected_delivery_date,
                    notes: FieldErrors::optional_text(self.notes.as_deref()),
                    lines,
                    total_amount,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

// ---------------------------------------------------------------------------
// Goods receipts
// ---------------------------------------------------------------------------

/// Payload for `POST /procurement/purchase-orders/{id}/receipts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoodsReceiptRequest {
    /// Delivery date, defaults to today.
    pub received_on: Option<String>,
    /// Delivery notes.
    pub notes: Option<String>,
    /// Received lines.
    pub lines: Option<Vec<GoodsReceiptLineRequest>>,
}

/// One received line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceiptLineRequest {
    /// Order line.
    pub po_line_id: Option<String>,
    /// Quantity delivered.
    pub received_quantity: Option<LooseValue>,
    /// Quantity accepted.
    pub accepted_quantity: Option<LooseValue>,
    /// Quantity rejected; defaults to received minus accepted.
    pub rejected_quantity: Option<LooseValue>,
    /// Required when anything is rejected.
    pub rejection_reason: Option<String>,
}

/// A validated goods receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoodsReceipt {
    /// Delivery date.
    pub received_on: Option<NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
    /// Lines.
    pub lines: Vec<ReceiptLine>,
}

impl Validate for GoodsReceiptLineRequest {
    type Output = ReceiptLine;

    fn validate(self) -> Result<ReceiptLine, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let po_line_id = errs.uuid("poLineId", self.po_line_id.as_deref());
        let received = errs.positive_decimal("receivedQuantity", self.received_quantity.as_ref());
        let accepted = errs.non_negative_decimal("acceptedQuantity", self.accepted_quantity.as_ref());
        let rejected = match (&self.rejected_quantity, received, accepted) {
            (Some(raw), _, _) => errs.non_negative_decimal("rejectedQuantity", Some(raw)),
            (None, Some(r), Some(a)) => Some(r - a),
            (None, _, _) => None,
        };
        let rejection_reason = FieldErrors::optional_text(self.rejection_reason.as_deref());

        if let (Some(r), Some(a), Some(x)) = (received, accepted, rejected)
            && ((x.is_sign_negative() && !x.is_zero()) || a + x != r)
        {
            errs.add(
                "acceptedQuantity",
                "quantity_mismatch",
                "acceptedQuantity plus rejectedQuantity must equal receivedQuantity",
            );
        }
        if rejected.is_some_and(|x| x > Decimal::ZERO) && rejection_reason.is_none() {
            errs.add(
                "rejectionReason",
                "required",
                "rejectionReason is required when goods are rejected",
            );
        }

        match (po_line_id, received, accepted, rejected) {
            (Some(po_line_id), Some(received_quantity), Some(accepted_quantity), Some(rejected_quantity))
                if errs.is_empty() =>
            {
                Ok(ReceiptLine {
                    po_line_id,
                    received_quantity,
                    accepted_quantity,
                    rejected_quantity,
                    rejection_reason,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

impl Validate for CreateGoodsReceiptRequest {
    type Output = NewGoodsReceipt;

    fn validate(self) -> Result<NewGoodsReceipt, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let received_on = errs.optional_date("receivedOn", self.received_on.as_deref());
        let lines = errs.nested_list("lines", self.lines);

        match lines {
            Some(lines) if errs.is_empty() => Ok(NewGoodsReceipt {
                received_on,
                notes: FieldErrors::optional_text(self.notes.as_deref()),
                lines,
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

// ---------------------------------------------------------------------------
// Vendor invoices
// ---------------------------------------------------------------------------

/// Payload for `POST /procurement/purchase-orders/{id}/invoices`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    /// The vendor's invoice number.
    pub invoice_number: Option<String>,
    /// Invoice date.
    pub invoice_date: Option<String>,
    /// Due date, on or after the invoice date.
    pub due_date: Option<String>,
    /// Invoiced lines.
    pub lines: Option<Vec<InvoiceLineRequest>>,
}

/// One invoiced line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineRequest {
    /// Order line being billed.
    pub po_line_id: Option<String>,
    /// Quantity billed.
    pub quantity: Option<LooseValue>,
    /// Unit price billed.
    pub unit_price: Option<LooseValue>,
}

/// A validated invoice line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoiceLine {
    /// Order line.
    pub po_line_id: Uuid,
    /// Quantity billed.
    pub quantity: Decimal,
    /// Unit price billed.
    pub unit_price: Decimal,
    /// `quantity × unit_price`, 2 dp.
    pub line_total: Decimal,
}

/// A validated vendor invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    /// Vendor invoice number.
    pub invoice_number: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Lines.
    pub lines: Vec<NewInvoiceLine>,
    /// Sum of line totals.
    pub total_amount: Decimal,
}

impl Validate for InvoiceLineRequest {
    type Output = NewInvoiceLine;

    fn validate(self) -> Result<NewInvoiceLine, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let po_line_id = errs.uuid("poLineId", self.po_line_id.as_deref());
        let quantity = errs.positive_decimal("quantity", self.quantity.as_ref());
        let unit_price = errs.non_negative_decimal("unitPrice", self.unit_price.as_ref());
        let total = match (quantity, unit_price) {
            (Some(q), Some(p)) => line_total(&mut errs, "unitPrice", q, p),
            _ => None,
        };

        match (po_line_id, quantity, unit_price, total) {
            (Some(po_line_id), Some(quantity), Some(unit_price), Some(line_total))
                if errs.is_empty() =>
            {
                Ok(NewInvoiceLine {
                    po_line_id,
                    quantity,
                    unit_price,
                    line_total,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

impl Validate for CreateInvoiceRequest {
    type Output = NewInvoice;

    fn validate(self) -> Result<NewInvoice, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let invoice_number = errs.required_text("invoiceNumber", self.invoice_number.as_deref());
        let invoice_date = errs.date("invoiceDate", self.invoice_date.as_deref());
        let due_date = errs.optional_date("dueDate", self.due_date.as_deref());
        if let (Some(issued), Some(due)) = (invoice_date, due_date)
            && due < issued
        {
            errs.add("dueDate", "date_order", "dueDate must not be before invoiceDate");
        }
        let lines = errs.nested_list("lines", self.lines);
        if let Some(lines) = &lines {
            let mut seen = HashSet::new();
            for (i, line) in lines.iter().enumerate() {
                if !seen.insert(line.po_line_id) {
                    errs.add(
                        format!("lines[{i}].poLineId"),
                        "duplicate",
                        "Each order line may appear only once per invoice",
                    );
                }
            }
        }
        let total_amount = match &lines {
            Some(lines) => sum(&mut errs, "lines", lines.iter().map(|l| l.line_total)),
            None => Decimal::ZERO,
        };

        match (invoice_number, invoice_date, lines) {
            (Some(invoice_number), Some(invoice_date), Some(lines)) if errs.is_empty() => {
                Ok(NewInvoice {
                    invoice_number,
                    invoice_date,
                    due_date,
                    lines,
                    total_amount,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching and payment
// ---------------------------------------------------------------------------

/// Payload for `POST /procurement/invoices/{id}/match`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInvoiceRequest {
    /// Tolerance override in percent (0-100).
    pub tolerance_percent: Option<LooseValue>,
}

impl Validate for MatchInvoiceRequest {
    type Output = Option<Decimal>;

    fn validate(self) -> Result<Option<Decimal>, ValidationErrors> {
        let Some(raw) = self.tolerance_percent else {
            return Ok(None);
        };
        let mut errs = FieldErrors::new();
        let tolerance = errs.decimal_in_range(
            "tolerancePercent",
            Some(&raw),
            Decimal::ZERO,
            Decimal::ONE_HUNDRED,
        );
        match tolerance {
            Some(t) => Ok(Some(t)),
            None => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /procurement/invoices/{id}/override`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverrideMatchRequest {
    /// Why the dispute is being accepted.
    pub notes: Option<String>,
}

impl Validate for OverrideMatchRequest {
    type Output = String;

    fn validate(self) -> Result<String, ValidationErrors> {
        let mut errs = FieldErrors::new();
        match errs.min_length("notes", self.notes.as_deref(), MIN_NARRATIVE_LENGTH) {
            Some(notes) => Ok(notes),
            None => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /procurement/invoices/{id}/payments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    /// Amount paid.
    pub amount: Option<LooseValue>,
    /// Payment method.
    pub method: Option<String>,
    /// Bank or cheque reference.
    pub reference: Option<String>,
    /// Payment date, defaults to today.
    pub paid_on: Option<String>,
}

/// A validated payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInput {
    /// Amount paid.
    pub amount: Decimal,
    /// Method.
    pub method: PaymentMethod,
    /// Reference.
    pub reference: Option<String>,
    /// Payment date.
    pub paid_on: Option<NaiveDate>,
}

impl Validate for RecordPaymentRequest {
    type Output = PaymentInput;

    fn validate(self) -> Result<PaymentInput, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let amount = errs.positive_decimal("amount", self.amount.as_ref());
        let method = errs.enum_value::<PaymentMethod>("method", self.method.as_deref());
        let paid_on = errs.optional_date("paidOn", self.paid_on.as_deref());

        match (amount, method) {
            (Some(amount), Some(method)) if errs.is_empty() => Ok(PaymentInput {
                amount,
                method,
                reference: FieldErrors::optional_text(self.reference.as_deref()),
                paid_on,
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn po_line(qty: &str, price: &str) -> PurchaseOrderLineRequest {
        PurchaseOrderLineRequest {
            description: Some("Hydraulic hose 2in".into()),
            stock_item_id: None,
            quantity: Some(qty.into()),
            unit_price: Some(price.into()),
        }
    }

    #[test]
    fn test_purchase_order_totals() {
        let po = CreatePurchaseOrderRequest {
            vendor_id: Some(Uuid::new_v4().to_string()),
            warehouse_id: Some(Uuid::new_v4().to_string()),
            lines: Some(vec![po_line("100", "10.00"), po_line("3", "2.335")]),
            ..CreatePurchaseOrderRequest::default()
        }
        .validate()
        .unwrap();
        assert_eq!(po.currency, DEFAULT_CURRENCY);
        assert_eq!(po.lines[1].line_total, dec!(7.01));
        assert_eq!(po.total_amount, dec!(1007.01));
    }

    #[test]
    fn test_purchase_order_nested_errors_are_indexed() {
        let errs = CreatePurchaseOrderRequest {
            vendor_id: Some(Uuid::new_v4().to_string()),
            warehouse_id: Some(Uuid::new_v4().to_string()),
            currency: Some("dollars".into()),
            lines: Some(vec![po_line("1", "1"), po_line("0", "abc")]),
            ..CreatePurchaseOrderRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("lines[1].quantity"), Some("positive"));
        assert_eq!(errs.code_for("lines[1].unitPrice"), Some("decimal"));
        assert_eq!(errs.code_for("currency"), Some("currency"));
        assert!(!errs.has_field("lines[0].quantity"));
    }

    #[test]
    fn test_purchase_order_requires_lines() {
        let errs = CreatePurchaseOrderRequest::default().validate().unwrap_err();
        assert_eq!(errs.code_for("lines"), Some("min_items"));
        assert_eq!(errs.code_for("vendorId"), Some("required"));
    }

    #[test]
    fn test_requisition_justification_length() {
        let errs = CreateRequisitionRequest {
            title: Some("Drill bits".into()),
            justification: Some("need".into()),
            department: Some("Drilling".into()),
            lines: Some(vec![RequisitionLineRequest {
                description: Some("45mm button bit".into()),
                quantity: Some("12".into()),
                ..RequisitionLineRequest::default()
            }]),
            ..CreateRequisitionRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("justification"), Some("min_length"));
    }

    #[test]
    fn test_requisition_estimated_total() {
        let req = CreateRequisitionRequest {
            title: Some("Drill bits".into()),
            justification: Some("Current stock worn beyond spec".into()),
            department: Some("Drilling".into()),
            lines: Some(vec![
                RequisitionLineRequest {
                    description: Some("45mm button bit".into()),
                    quantity: Some("12".into()),
                    estimated_unit_price: Some("85.50".into()),
                    ..RequisitionLineRequest::default()
                },
                RequisitionLineRequest {
                    description: Some("Shank adapter".into()),
                    quantity: Some("2".into()),
                    ..RequisitionLineRequest::default()
                },
            ]),
            ..CreateRequisitionRequest::default()
        }
        .validate()
        .unwrap();
        assert_eq!(req.estimated_total, dec!(1026));
    }

    #[test]
    fn test_receipt_line_defaults_rejected_quantity() {
        let line = GoodsReceiptLineRequest {
            po_line_id: Some(Uuid::new_v4().to_string()),
            received_quantity: Some("10".into()),
            accepted_quantity: Some("8".into()),
            rejected_quantity: None,
            rejection_reason: Some("Two cartons crushed".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(line.rejected_quantity, dec!(2));
    }

    #[test]
    fn test_receipt_line_rejection_needs_reason() {
        let errs = CreateGoodsReceiptRequest {
            lines: Some(vec![GoodsReceiptLineRequest {
                po_line_id: Some(Uuid::new_v4().to_string()),
                received_quantity: Some("10".into()),
                accepted_quantity: Some("8".into()),
                rejected_quantity: Some("2".into()),
                rejection_reason: None,
            }]),
            ..CreateGoodsReceiptRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("lines[0].rejectionReason"), Some("required"));
    }

    #[test]
    fn test_receipt_line_quantities_must_add_up() {
        let errs = GoodsReceiptLineRequest {
            po_line_id: Some(Uuid::new_v4().to_string()),
            received_quantity: Some("10".into()),
            accepted_quantity: Some("12".into()),
            rejected_quantity: None,
            rejection_reason: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("acceptedQuantity"), Some("quantity_mismatch"));
    }

    #[test]
    fn test_invoice_due_date_order() {
        let errs = CreateInvoiceRequest {
            invoice_number: Some("INV-0042".into()),
            invoice_date: Some("2026-03-10".into()),
            due_date: Some("2026-03-01".into()),
            lines: Some(vec![InvoiceLineRequest {
                po_line_id: Some(Uuid::new_v4().to_string()),
                quantity: Some("100".into()),
                unit_price: Some("10.00".into()),
            }]),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("dueDate"), Some("date_order"));
    }

    #[test]
    fn test_invoice_rejects_repeated_order_line() {
        let po_line_id = Uuid::new_v4().to_string();
        let invoice_line = |qty: &str| InvoiceLineRequest {
            po_line_id: Some(po_line_id.clone()),
            quantity: Some(qty.into()),
            unit_price: Some("10.00".into()),
        };
        let errs = CreateInvoiceRequest {
            invoice_number: Some("INV-0043".into()),
            invoice_date: Some("2026-03-10".into()),
            due_date: None,
            lines: Some(vec![invoice_line("100"), invoice_line("100")]),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("lines[1].poLineId"), Some("duplicate"));
        assert_eq!(errs.code_for("lines[0].poLineId"), None);
    }

    #[test]
    fn test_tolerance_override_bounds() {
        let ok = MatchInvoiceRequest {
            tolerance_percent: Some("12.5".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok, Some(dec!(12.5)));
        assert_eq!(MatchInvoiceRequest::default().validate().unwrap(), None);
        let errs = MatchInvoiceRequest {
            tolerance_percent: Some("-1".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("tolerancePercent"), Some("min"));
    }

    #[test]
    fn test_override_notes_length() {
        let errs = OverrideMatchRequest {
            notes: Some("ok fine".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("notes"), Some("min_length"));
    }

    #[test]
    fn test_payment_request() {
        let payment = RecordPaymentRequest {
            amount: Some("250.00".into()),
            method: Some("eft".into()),
            ..RecordPaymentRequest::default()
        }
        .validate()
        .unwrap();
        assert_eq!(payment.method, PaymentMethod::Eft);

        let errs = RecordPaymentRequest {
            amount: Some("0".into()),
            method: Some("bitcoin".into()),
            ..RecordPaymentRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("amount"), Some("positive"));
        assert_eq!(errs.code_for("method"), Some("enum"));
    }

    #[test]
    fn test_vendor_code_uppercased() {
        let vendor = CreateVendorRequest {
            name: Some("Boart Longyear".into()),
            code: Some("blyr".into()),
            contact_email: Some("accounts@boart.example".into()),
            phone: None,
        }
        .validate()
        .unwrap();
        assert_eq!(vendor.code, "BLYR");
    }
}
