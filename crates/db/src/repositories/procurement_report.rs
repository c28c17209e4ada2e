//! Read-only procurement KPIs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ridgeline_core::procurement::{
    CycleSample, MatchStatus, ProcurementError, ProcurementMetrics, ProcurementMetricsInput,
    PurchaseOrderStatus,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{goods_receipts, purchase_orders, requisitions, vendor_invoices};

fn db_err(e: DbErr) -> ProcurementError {
    ProcurementError::Database(e.to_string())
}

/// Orders whose receiving is complete.
const COMPLETED: [PurchaseOrderStatus; 5] = [
    PurchaseOrderStatus::Received,
    PurchaseOrderStatus::MatchPending,
    PurchaseOrderStatus::Matched,
    PurchaseOrderStatus::Disputed,
    PurchaseOrderStatus::Paid,
];

/// Computes procurement metrics from the live tables on every call.
#[derive(Debug, Clone)]
pub struct ProcurementReportRepository {
    db: DatabaseConnection,
}

impl ProcurementReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Compliance rate, invoice match rate and average cycle time.
    pub async fn metrics(&self) -> Result<ProcurementMetrics, ProcurementError> {
        let total_orders = purchase_orders::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let approved_orders = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::ApprovedAt.is_not_null())
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let total_invoices = vendor_invoices::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let matched_invoices = vendor_invoices::Entity::find()
            .filter(vendor_invoices::Column::MatchStatus.eq(MatchStatus::Matched.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let cycles = self.cycle_samples().await?;

        Ok(ProcurementMetrics::compute(&ProcurementMetricsInput {
            total_orders,
            approved_orders,
            total_invoices,
            matched_invoices,
            cycles,
        }))
    }

    /// One sample per completed order: requisition (or order) creation to
    /// the latest receipt that accepted anything.
    async fn cycle_samples(&self) -> Result<Vec<CycleSample>, ProcurementError> {
        let orders = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::Status.is_in(COMPLETED.map(|s| s.as_str())))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let requisition_ids: Vec<Uuid> = orders.iter().filter_map(|o| o.requisition_id).collect();

        let requisition_created: BTreeMap<Uuid, DateTime<Utc>> = requisitions::Entity::find()
            .filter(requisitions::Column::Id.is_in(requisition_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|r| (r.id, r.created_at.with_timezone(&Utc)))
            .collect();

        let mut last_receipt: BTreeMap<Uuid, DateTime<Utc>> = BTreeMap::new();
        for receipt in goods_receipts::Entity::find()
            .filter(goods_receipts::Column::PurchaseOrderId.is_in(order_ids))
            .filter(goods_receipts::Column::AcceptedTotal.gt(Decimal::ZERO))
            .all(&self.db)
            .await
            .map_err(db_err)?
        {
            let at = receipt.received_at.with_timezone(&Utc);
            last_receipt
                .entry(receipt.purchase_order_id)
                .and_modify(|latest| *latest = (*latest).max(at))
                .or_insert(at);
        }

        Ok(orders
            .iter()
            .filter_map(|order| {
                let completed_at = *last_receipt.get(&order.id)?;
                let started_at = order
                    .requisition_id
                    .and_then(|id| requisition_created.get(&id).copied())
                    .unwrap_or_else(|| order.created_at.with_timezone(&Utc));
                Some(CycleSample {
                    started_at,
                    completed_at,
                })
            })
            .collect())
    }
}
