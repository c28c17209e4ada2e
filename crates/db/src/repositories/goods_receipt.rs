//! Goods receipt repository.

use std::collections::BTreeMap;

use chrono::Utc;
use ridgeline_core::inventory::{InventoryError, MovementTarget, MovementType, NewStockMovement};
use ridgeline_core::procurement::{NewGoodsReceipt, PoLineState, ProcurementError, ReceivingService};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::inventory::apply_movement;
use super::purchase_order::{order_lines, status_of};
use super::support::reference_number;
use crate::entities::{goods_receipt_lines, goods_receipts, purchase_order_lines, purchase_orders};

fn db_err(e: DbErr) -> ProcurementError {
    ProcurementError::Database(e.to_string())
}

fn stock_err(e: InventoryError) -> ProcurementError {
    ProcurementError::Database(e.to_string())
}

/// A goods receipt with its lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceiptDetail {
    /// Header.
    #[serde(flatten)]
    pub receipt: goods_receipts::Model,
    /// Lines as received.
    pub lines: Vec<goods_receipt_lines::Model>,
}

/// Goods receipt persistence.
#[derive(Debug, Clone)]
pub struct GoodsReceiptRepository {
    db: DatabaseConnection,
}

impl GoodsReceiptRepository {
    /// Creates a new goods receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Receives goods against a purchase order.
    ///
    /// In one transaction: locks the order, checks the receipt against the
    /// cumulative accepted quantities, writes the GRN, bumps each order
    /// line's accepted quantity, moves the order to `PARTIALLY_RECEIVED` or
    /// `RECEIVED` and posts an `IN` movement into the delivery warehouse for
    /// every accepted line linked to a stock item.
    ///
    /// # Errors
    ///
    /// - `PurchaseOrderNotFound`
    /// - `NotReceivable` / `UnknownOrderLine` / `OverReceipt`
    pub async fn receive(
        &self,
        purchase_order_id: Uuid,
        received_by: Uuid,
        input: NewGoodsReceipt,
    ) -> Result<GoodsReceiptDetail, ProcurementError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let order = purchase_orders::Entity::find_by_id(purchase_order_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::PurchaseOrderNotFound(purchase_order_id))?;

        let po_lines = order_lines(&txn, purchase_order_id).await?;
        let states: Vec<PoLineState> = po_lines
            .iter()
            .map(|l| PoLineState {
                line_id: l.id,
                ordered_quantity: l.quantity,
                accepted_quantity: l.accepted_quantity,
            })
            .collect();
        let plan = ReceivingService::plan(status_of(&order)?, &states, &input.lines)?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let grn_number = reference_number("GRN", id, now);
        let accepted_total: Decimal = input.lines.iter().map(|l| l.accepted_quantity).sum();

        let receipt = goods_receipts::ActiveModel {
            id: Set(id),
            grn_number: Set(grn_number.clone()),
            purchase_order_id: Set(purchase_order_id),
            received_by: Set(received_by),
            received_on: Set(input.received_on.unwrap_or_else(|| now.date_naive())),
            received_at: Set(now.into()),
            accepted_total: Set(accepted_total),
            notes: Set(input.notes),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut lines = Vec::with_capacity(input.lines.len());
        let mut accepted_per_line: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for line in input.lines {
            *accepted_per_line.entry(line.po_line_id).or_default() += line.accepted_quantity;
            let model = goods_receipt_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                goods_receipt_id: Set(id),
                purchase_order_line_id: Set(line.po_line_id),
                received_quantity: Set(line.received_quantity),
                accepted_quantity: Set(line.accepted_quantity),
                rejected_quantity: Set(line.rejected_quantity),
                rejection_reason: Set(line.rejection_reason),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
            lines.push(model);
        }

        for po_line in po_lines {
            let Some(total) = plan.accepted_total(po_line.id) else {
                continue;
            };
            let accepted_now = accepted_per_line
                .get(&po_line.id)
                .copied()
                .unwrap_or_default();
            let stock_item_id = po_line.stock_item_id;

            let mut active: purchase_order_lines::ActiveModel = po_line.into();
            active.accepted_quantity = Set(total);
            active.update(&txn).await.map_err(db_err)?;

            if let Some(item_id) = stock_item_id
                && accepted_now > Decimal::ZERO
            {
                let movement = NewStockMovement {
                    item_id,
                    kind: MovementType::In,
                    quantity: accepted_now,
                    target: MovementTarget::Single(order.warehouse_id),
                    reference: Some(grn_number.clone()),
                    notes: None,
                };
                apply_movement(&txn, received_by, movement)
                    .await
                    .map_err(stock_err)?;
            }
        }

        let from = status_of(&order)?;
        let mut active: purchase_orders::ActiveModel = order.into();
        active.status = Set(plan.new_status.as_str().to_string());
        active.updated_at = Set(now.into());
        active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        info!(
            goods_receipt_id = %id,
            grn_number = %grn_number,
            purchase_order_id = %purchase_order_id,
            from = %from,
            to = %plan.new_status,
            "Goods received"
        );
        Ok(GoodsReceiptDetail { receipt, lines })
    }

    /// Receipts for a purchase order, oldest first.
    pub async fn list_for_order(
        &self,
        purchase_order_id: Uuid,
    ) -> Result<Vec<GoodsReceiptDetail>, ProcurementError> {
        let receipts = goods_receipts::Entity::find()
            .filter(goods_receipts::Column::PurchaseOrderId.eq(purchase_order_id))
            .order_by_asc(goods_receipts::Column::ReceivedAt)
            .find_with_related(goods_receipt_lines::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(receipts
            .into_iter()
            .map(|(receipt, lines)| GoodsReceiptDetail { receipt, lines })
            .collect())
    }
}
