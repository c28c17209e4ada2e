//! `SeaORM` Entity for goods_receipts table.
//!
//! Goods receipt notes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "goods_receipts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub grn_number: String,
    pub purchase_order_id: Uuid,
    pub received_by: Uuid,
    pub received_on: Date,
    pub received_at: DateTimeWithTimeZone,
    pub accepted_total: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_orders::Entity",
        from = "Column::PurchaseOrderId",
        to = "super::purchase_orders::Column::Id"
    )]
    PurchaseOrders,
    #[sea_orm(has_many = "super::goods_receipt_lines::Entity")]
    GoodsReceiptLines,
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl Related<super::goods_receipt_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoodsReceiptLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
