//! Vendor invoice, three-way match and payment repository.

use std::collections::BTreeMap;

use chrono::Utc;
use ridgeline_core::procurement::{
    MatchLine, MatchState, MatchStatus, MatchingService, NewInvoice, PaymentInput, PaymentService,
    PaymentStatus, ProcurementError, PurchaseOrderService, PurchaseOrderStatus,
};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::purchase_order::{order_lines, status_of as order_status};
use super::support::{decode, fetch_page, search_condition};
use crate::entities::{payments, purchase_orders, vendor_invoice_lines, vendor_invoices};

fn db_err(e: DbErr) -> ProcurementError {
    ProcurementError::Database(e.to_string())
}

fn stored<E: ridgeline_core::validation::EnumValue>(raw: &str) -> Result<E, ProcurementError> {
    decode(raw).map_err(|e| ProcurementError::Database(e.to_string()))
}

/// An invoice with its lines and payments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    /// Header, including the latest match result.
    #[serde(flatten)]
    pub invoice: vendor_invoices::Model,
    /// Lines with per-line variances once matched.
    pub lines: Vec<vendor_invoice_lines::Model>,
    /// Payments, oldest first.
    pub payments: Vec<payments::Model>,
}

/// A recorded payment and the invoice it settled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// The payment.
    pub payment: payments::Model,
    /// Invoice after the payment.
    pub invoice: vendor_invoices::Model,
}

/// Vendor invoice persistence.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a vendor invoice against a received purchase order.
    ///
    /// The invoice starts `MATCH_PENDING` / `UNPAID` and the order moves to
    /// `MATCH_PENDING`.
    ///
    /// # Errors
    ///
    /// - `PurchaseOrderNotFound` / `NotInvoiceable`
    /// - `UnknownOrderLine` if a line is not on the order
    /// - `DuplicateInvoice` if the vendor already sent this number
    pub async fn register(
        &self,
        purchase_order_id: Uuid,
        registered_by: Uuid,
        input: NewInvoice,
    ) -> Result<InvoiceDetail, ProcurementError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let order = purchase_orders::Entity::find_by_id(purchase_order_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::PurchaseOrderNotFound(purchase_order_id))?;
        let next = PurchaseOrderService::register_invoice(order_status(&order)?)?;

        let po_lines = order_lines(&txn, purchase_order_id).await?;
        if let Some(unknown) = input
            .lines
            .iter()
            .find(|l| !po_lines.iter().any(|p| p.id == l.po_line_id))
        {
            return Err(ProcurementError::UnknownOrderLine(unknown.po_line_id));
        }

        let duplicate = vendor_invoices::Entity::find()
            .filter(vendor_invoices::Column::VendorId.eq(order.vendor_id))
            .filter(vendor_invoices::Column::InvoiceNumber.eq(&input.invoice_number))
            .one(&txn)
            .await
            .map_err(db_err)?;
        if duplicate.is_some() {
            return Err(ProcurementError::DuplicateInvoice(input.invoice_number));
        }

        let now = Utc::now().into();
        let id = Uuid::new_v4();
        let invoice = vendor_invoices::ActiveModel {
            id: Set(id),
            invoice_number: Set(input.invoice_number),
            vendor_id: Set(order.vendor_id),
            purchase_order_id: Set(purchase_order_id),
            invoice_date: Set(input.invoice_date),
            due_date: Set(input.due_date),
            currency: Set(order.currency.clone()),
            total_amount: Set(input.total_amount),
            paid_amount: Set(Decimal::ZERO),
            match_status: Set(MatchStatus::MatchPending.as_str().to_string()),
            payment_status: Set(PaymentStatus::Unpaid.as_str().to_string()),
            price_variance: Set(None),
            quantity_variance: Set(None),
            tolerance_used: Set(None),
            matched_at: Set(None),
            override_notes: Set(None),
            overridden_by: Set(None),
            overridden_at: Set(None),
            registered_by: Set(registered_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for line in input.lines {
            let model = vendor_invoice_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                vendor_invoice_id: Set(id),
                purchase_order_line_id: Set(line.po_line_id),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                line_total: Set(line.line_total),
                price_variance: Set(None),
                quantity_variance: Set(None),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
            lines.push(model);
        }

        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        active.updated_at = Set(now);
        active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        info!(
            invoice_id = %id,
            invoice_number = %invoice.invoice_number,
            purchase_order_id = %purchase_order_id,
            total = %invoice.total_amount,
            "Vendor invoice registered"
        );
        Ok(InvoiceDetail {
            invoice,
            lines,
            payments: Vec::new(),
        })
    }

    /// Lists invoices, newest first.
    pub async fn list(
        &self,
        query: &ListQuery<MatchStatus>,
    ) -> Result<PageResponse<vendor_invoices::Model>, ProcurementError> {
        let mut select =
            vendor_invoices::Entity::find().order_by_desc(vendor_invoices::Column::CreatedAt);
        if let Some(status) = query.status {
            select = select.filter(vendor_invoices::Column::MatchStatus.eq(status.as_str()));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[vendor_invoices::Column::InvoiceNumber],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Invoices registered against an order.
    pub async fn list_for_order(
        &self,
        purchase_order_id: Uuid,
    ) -> Result<Vec<vendor_invoices::Model>, ProcurementError> {
        invoices_of(&self.db, purchase_order_id).await
    }

    /// Fetches an invoice with lines and payments.
    pub async fn get(&self, id: Uuid) -> Result<InvoiceDetail, ProcurementError> {
        let invoice = find_invoice(&self.db, id).await?;
        let lines = invoice_lines(&self.db, id).await?;
        let payments = self.list_payments(id).await?;
        Ok(InvoiceDetail {
            invoice,
            lines,
            payments,
        })
    }

    /// Runs the three-way match for an invoice.
    ///
    /// Each invoice line is compared with its order line's unit price and
    /// cumulative accepted quantity. The result is written to the invoice
    /// and its lines, and the order status is re-derived from all of its
    /// invoices. Re-running with the same inputs writes the same result.
    ///
    /// # Errors
    ///
    /// - `InvoiceNotFound`
    /// - `NotMatchable` unless the invoice is `MATCH_PENDING`, `MATCHED` or `DISPUTED`
    /// - `PaymentStarted` once any payment is recorded
    /// - `MatchOverridden` after a manual override
    pub async fn match_invoice(
        &self,
        id: Uuid,
        tolerance: Decimal,
    ) -> Result<InvoiceDetail, ProcurementError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let invoice = vendor_invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::InvoiceNotFound(id))?;
        let state = MatchState {
            status: stored(&invoice.match_status)?,
            payment: stored(&invoice.payment_status)?,
            overridden: invoice.overridden_at.is_some(),
        };

        let po_lines: BTreeMap<Uuid, _> = order_lines(&txn, invoice.purchase_order_id)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();
        let lines = invoice_lines(&txn, id).await?;

        let mut match_lines = Vec::with_capacity(lines.len());
        for line in &lines {
            let po_line = po_lines
                .get(&line.purchase_order_line_id)
                .ok_or(ProcurementError::UnknownOrderLine(line.purchase_order_line_id))?;
            match_lines.push(MatchLine {
                po_line_id: line.purchase_order_line_id,
                po_unit_price: po_line.unit_price,
                received_quantity: po_line.accepted_quantity,
                invoice_quantity: line.quantity,
                invoice_unit_price: line.unit_price,
            });
        }
        let outcome = MatchingService::run(state, &match_lines, tolerance)?;

        let mut updated_lines = Vec::with_capacity(lines.len());
        for (line, variance) in lines.into_iter().zip(&outcome.lines) {
            let mut active: vendor_invoice_lines::ActiveModel = line.into();
            active.price_variance = Set(Some(variance.price_variance));
            active.quantity_variance = Set(Some(variance.quantity_variance));
            updated_lines.push(active.update(&txn).await.map_err(db_err)?);
        }

        let now = Utc::now().into();
        let purchase_order_id = invoice.purchase_order_id;
        let mut active: vendor_invoices::ActiveModel = invoice.into();
        active.match_status = Set(outcome.status.as_str().to_string());
        active.price_variance = Set(Some(outcome.price_variance));
        active.quantity_variance = Set(Some(outcome.quantity_variance));
        active.tolerance_used = Set(Some(outcome.tolerance));
        active.matched_at = Set(Some(now));
        active.updated_at = Set(now);
        let invoice = active.update(&txn).await.map_err(db_err)?;

        sync_order_match_status(&txn, purchase_order_id).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            invoice_id = %id,
            status = %outcome.status,
            price_variance = %outcome.price_variance,
            quantity_variance = %outcome.quantity_variance,
            tolerance = %outcome.tolerance,
            "Invoice matched"
        );
        let payments = self.list_payments(id).await?;
        Ok(InvoiceDetail {
            invoice,
            lines: updated_lines,
            payments,
        })
    }

    /// Accepts a disputed invoice by manual override.
    ///
    /// # Errors
    ///
    /// - `InvoiceNotFound`
    /// - `NotDisputed` unless the invoice is `DISPUTED`
    pub async fn override_match(
        &self,
        id: Uuid,
        overridden_by: Uuid,
        notes: String,
    ) -> Result<vendor_invoices::Model, ProcurementError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let invoice = vendor_invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::InvoiceNotFound(id))?;
        let next = MatchingService::override_dispute(stored(&invoice.match_status)?)?;

        let now = Utc::now().into();
        let purchase_order_id = invoice.purchase_order_id;
        let mut active: vendor_invoices::ActiveModel = invoice.into();
        active.match_status = Set(next.as_str().to_string());
        active.override_notes = Set(Some(notes));
        active.overridden_by = Set(Some(overridden_by));
        active.overridden_at = Set(Some(now));
        active.updated_at = Set(now);
        let invoice = active.update(&txn).await.map_err(db_err)?;

        sync_order_match_status(&txn, purchase_order_id).await?;
        txn.commit().await.map_err(db_err)?;

        info!(invoice_id = %id, overridden_by = %overridden_by, "Invoice dispute overridden");
        Ok(invoice)
    }

    /// Records a payment against a matched invoice.
    ///
    /// Marks the order `PAID` once every invoice on it is paid.
    ///
    /// # Errors
    ///
    /// - `InvoiceNotFound`
    /// - `NotMatched` / `AlreadyPaid` / `Overpayment`
    pub async fn record_payment(
        &self,
        id: Uuid,
        recorded_by: Uuid,
        input: PaymentInput,
    ) -> Result<PaymentReceipt, ProcurementError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let invoice = vendor_invoices::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::InvoiceNotFound(id))?;
        let plan = PaymentService::plan(
            stored(&invoice.match_status)?,
            invoice.total_amount,
            invoice.paid_amount,
            input.amount,
        )?;

        let now = Utc::now();
        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            vendor_invoice_id: Set(id),
            amount: Set(input.amount),
            method: Set(input.method.as_str().to_string()),
            reference: Set(input.reference),
            paid_on: Set(input.paid_on.unwrap_or_else(|| now.date_naive())),
            recorded_by: Set(recorded_by),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let purchase_order_id = invoice.purchase_order_id;
        let mut active: vendor_invoices::ActiveModel = invoice.into();
        active.paid_amount = Set(plan.paid_amount);
        active.payment_status = Set(plan.payment_status.as_str().to_string());
        active.updated_at = Set(now.into());
        let invoice = active.update(&txn).await.map_err(db_err)?;

        if plan.payment_status == PaymentStatus::Paid {
            let order = purchase_orders::Entity::find_by_id(purchase_order_id)
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or(ProcurementError::PurchaseOrderNotFound(purchase_order_id))?;
            let current = order_status(&order)?;
            let statuses = invoices_of(&txn, purchase_order_id)
                .await?
                .iter()
                .map(|i| stored::<PaymentStatus>(&i.payment_status))
                .collect::<Result<Vec<_>, _>>()?;
            let next = PurchaseOrderService::status_after_payment(current, &statuses);
            if next != current {
                let mut active: purchase_orders::ActiveModel = order.into();
                active.status = Set(next.as_str().to_string());
                active.updated_at = Set(now.into());
                active.update(&txn).await.map_err(db_err)?;
                info!(purchase_order_id = %purchase_order_id, "Purchase order paid");
            }
        }

        txn.commit().await.map_err(db_err)?;

        info!(
            invoice_id = %id,
            payment_id = %payment.id,
            amount = %payment.amount,
            remaining = %plan.remaining,
            status = %plan.payment_status,
            "Payment recorded"
        );
        Ok(PaymentReceipt { payment, invoice })
    }

    /// Payments on an invoice, oldest first.
    pub async fn list_payments(&self, id: Uuid) -> Result<Vec<payments::Model>, ProcurementError> {
        payments::Entity::find()
            .filter(payments::Column::VendorInvoiceId.eq(id))
            .order_by_asc(payments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

async fn find_invoice<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<vendor_invoices::Model, ProcurementError> {
    vendor_invoices::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(ProcurementError::InvoiceNotFound(id))
}

async fn invoice_lines<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Vec<vendor_invoice_lines::Model>, ProcurementError> {
    vendor_invoice_lines::Entity::find()
        .filter(vendor_invoice_lines::Column::VendorInvoiceId.eq(id))
        .order_by_asc(vendor_invoice_lines::Column::Id)
        .all(conn)
        .await
        .map_err(db_err)
}

async fn invoices_of<C: ConnectionTrait>(
    conn: &C,
    purchase_order_id: Uuid,
) -> Result<Vec<vendor_invoices::Model>, ProcurementError> {
    vendor_invoices::Entity::find()
        .filter(vendor_invoices::Column::PurchaseOrderId.eq(purchase_order_id))
        .order_by_asc(vendor_invoices::Column::CreatedAt)
        .all(conn)
        .await
        .map_err(db_err)
}

/// Re-derives the order status from the match status of its invoices.
/// Paid orders are left alone.
async fn sync_order_match_status<C: ConnectionTrait>(
    conn: &C,
    purchase_order_id: Uuid,
) -> Result<(), ProcurementError> {
    let order = purchase_orders::Entity::find_by_id(purchase_order_id)
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(ProcurementError::PurchaseOrderNotFound(purchase_order_id))?;
    let current = order_status(&order)?;
    if current == PurchaseOrderStatus::Paid {
        return Ok(());
    }

    let statuses = invoices_of(conn, purchase_order_id)
        .await?
        .iter()
        .map(|i| stored::<MatchStatus>(&i.match_status))
        .collect::<Result<Vec<_>, _>>()?;
    let next = PurchaseOrderService::status_from_invoices(&statuses);
    if next != current {
        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        active.update(conn).await.map_err(db_err)?;
    }
    Ok(())
}
