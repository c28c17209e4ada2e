//! `SeaORM` Entity for goods_receipt_lines table.
//!
//! Goods receipt lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "goods_receipt_lines")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub goods_receipt_id: Uuid,
    pub purchase_order_line_id: Uuid,
    pub received_quantity: Decimal,
    pub accepted_quantity: Decimal,
    pub rejected_quantity: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::goods_receipts::Entity",
        from = "Column::GoodsReceiptId",
        to = "super::goods_receipts::Column::Id"
    )]
    GoodsReceipts,
}

impl Related<super::goods_receipts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoodsReceipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
