//! Purchase order repository.

use chrono::Utc;
use ridgeline_core::procurement::{
    NewPurchaseOrder, ProcurementError, PurchaseOrderService, PurchaseOrderStatus,
    RequisitionService,
};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::requisition::status_of as requisition_status;
use super::support::{decode, fetch_page, reference_number, search_condition};
use crate::entities::{goods_receipts, purchase_order_lines, purchase_orders, requisitions, vendors, warehouses};

fn db_err(e: DbErr) -> ProcurementError {
    ProcurementError::Database(e.to_string())
}

/// A purchase order with its lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDetail {
    /// Header.
    #[serde(flatten)]
    pub order: purchase_orders::Model,
    /// Lines in order.
    pub lines: Vec<purchase_order_lines::Model>,
}

/// Purchase order persistence and approval transitions.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    db: DatabaseConnection,
}

impl PurchaseOrderRepository {
    /// Creates a new purchase order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft purchase order.
    ///
    /// When raised from a requisition, the requisition must be approved and
    /// is marked converted in the same transaction.
    ///
    /// # Errors
    ///
    /// - `VendorNotFound` / `InactiveVendor`
    /// - `WarehouseNotFound`
    /// - `RequisitionNotFound` / `RequisitionNotApproved`
    pub async fn create(
        &self,
        created_by: Uuid,
        input: NewPurchaseOrder,
    ) -> Result<PurchaseOrderDetail, ProcurementError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let vendor = vendors::Entity::find_by_id(input.vendor_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::VendorNotFound(input.vendor_id))?;
        if !vendor.is_active {
            return Err(ProcurementError::InactiveVendor(vendor.id));
        }

        warehouses::Entity::find_by_id(input.warehouse_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::WarehouseNotFound(input.warehouse_id))?;

        let now = Utc::now();
        if let Some(requisition_id) = input.requisition_id {
            let requisition = requisitions::Entity::find_by_id(requisition_id)
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or(ProcurementError::RequisitionNotFound(requisition_id))?;
            let next = RequisitionService::convert(requisition_status(&requisition)?)?;

            let mut active: requisitions::ActiveModel = requisition.into();
            active.status = Set(next.as_str().to_string());
            active.updated_at = Set(now.into());
            active.update(&txn).await.map_err(db_err)?;
        }

        let id = Uuid::new_v4();
        let order = purchase_orders::ActiveModel {
            id: Set(id),
            po_number: Set(reference_number("PO", id, now)),
            vendor_id: Set(input.vendor_id),
            requisition_id: Set(input.requisition_id),
            warehouse_id: Set(input.warehouse_id),
            currency: Set(input.currency),
            total_amount: Set(input.total_amount),
            status: Set(PurchaseOrderStatus::Draft.as_str().to_string()),
            expected_delivery_date: Set(input.expected_delivery_date),
            notes: Set(input.notes),
            created_by: Set(created_by),
            submitted_at: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            rejection_reason: Set(None),
            cancellation_reason: Set(None),
            cancelled_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (line_number, line) in (1..).zip(input.lines) {
            let model = purchase_order_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_order_id: Set(id),
                line_number: Set(line_number),
                description: Set(line.description),
                stock_item_id: Set(line.stock_item_id),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                line_total: Set(line.line_total),
                accepted_quantity: Set(rust_decimal::Decimal::ZERO),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
            lines.push(model);
        }

        txn.commit().await.map_err(db_err)?;

        info!(
            purchase_order_id = %id,
            po_number = %order.po_number,
            total = %order.total_amount,
            "Purchase order created"
        );
        Ok(PurchaseOrderDetail { order, lines })
    }

    /// Lists purchase orders. `mine` restricts to orders the caller raised.
    pub async fn list(
        &self,
        query: &ListQuery<PurchaseOrderStatus>,
        caller: Uuid,
    ) -> Result<PageResponse<purchase_orders::Model>, ProcurementError> {
        let mut select =
            purchase_orders::Entity::find().order_by_desc(purchase_orders::Column::CreatedAt);
        if let Some(status) = query.status {
            select = select.filter(purchase_orders::Column::Status.eq(status.as_str()));
        }
        if query.only_mine() {
            select = select.filter(purchase_orders::Column::CreatedBy.eq(caller));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[purchase_orders::Column::PoNumber, purchase_orders::Column::Notes],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches a purchase order header.
    pub async fn find(&self, id: Uuid) -> Result<purchase_orders::Model, ProcurementError> {
        find_order(&self.db, id).await
    }

    /// Fetches a purchase order with its lines.
    pub async fn get(&self, id: Uuid) -> Result<PurchaseOrderDetail, ProcurementError> {
        let order = self.find(id).await?;
        let lines = order_lines(&self.db, id).await?;
        Ok(PurchaseOrderDetail { order, lines })
    }

    /// Draft → PendingApproval.
    pub async fn submit(&self, id: Uuid) -> Result<purchase_orders::Model, ProcurementError> {
        let order = self.find(id).await?;
        let next = PurchaseOrderService::submit(status_of(&order)?)?;

        let now = Utc::now().into();
        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        active.submitted_at = Set(Some(now));
        active.rejection_reason = Set(None);
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(purchase_order_id = %id, "Purchase order submitted");
        Ok(updated)
    }

    /// PendingApproval → Approved.
    pub async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
    ) -> Result<purchase_orders::Model, ProcurementError> {
        let order = self.find(id).await?;
        let next = PurchaseOrderService::approve(status_of(&order)?)?;

        let now = Utc::now().into();
        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        active.approved_by = Set(Some(approved_by));
        active.approved_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(purchase_order_id = %id, approved_by = %approved_by, "Purchase order approved");
        Ok(updated)
    }

    /// PendingApproval → Draft, keeping the reason for the requester.
    pub async fn reject(
        &self,
        id: Uuid,
        rejected_by: Uuid,
        reason: String,
    ) -> Result<purchase_orders::Model, ProcurementError> {
        let order = self.find(id).await?;
        let next = PurchaseOrderService::reject(status_of(&order)?)?;

        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        active.submitted_at = Set(None);
        active.rejection_reason = Set(Some(reason));
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(purchase_order_id = %id, rejected_by = %rejected_by, "Purchase order rejected");
        Ok(updated)
    }

    /// Draft | PendingApproval | Approved → Cancelled, if nothing was received.
    pub async fn cancel(
        &self,
        id: Uuid,
        cancelled_by: Uuid,
        reason: String,
    ) -> Result<purchase_orders::Model, ProcurementError> {
        let order = self.find(id).await?;
        let receipts = goods_receipts::Entity::find()
            .filter(goods_receipts::Column::PurchaseOrderId.eq(id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let next = PurchaseOrderService::cancel(status_of(&order)?, receipts > 0)?;

        let now = Utc::now().into();
        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(next.as_str().to_string());
        active.cancellation_reason = Set(Some(reason));
        active.cancelled_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;

        info!(purchase_order_id = %id, cancelled_by = %cancelled_by, "Purchase order cancelled");
        Ok(updated)
    }
}

pub(crate) async fn find_order<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<purchase_orders::Model, ProcurementError> {
    purchase_orders::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(ProcurementError::PurchaseOrderNotFound(id))
}

pub(crate) async fn order_lines<C: ConnectionTrait>(
    conn: &C,
    purchase_order_id: Uuid,
) -> Result<Vec<purchase_order_lines::Model>, ProcurementError> {
    purchase_order_lines::Entity::find()
        .filter(purchase_order_lines::Column::PurchaseOrderId.eq(purchase_order_id))
        .order_by_asc(purchase_order_lines::Column::LineNumber)
        .all(conn)
        .await
        .map_err(db_err)
}

pub(crate) fn status_of(
    order: &purchase_orders::Model,
) -> Result<PurchaseOrderStatus, ProcurementError> {
    decode(&order.status).map_err(|e| ProcurementError::Database(e.to_string()))
}
