//! `SeaORM` Entity for requisition_lines table.
//!
//! Requisition lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "requisition_lines")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub requisition_id: Uuid,
    pub line_number: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub stock_item_id: Option<Uuid>,
    pub quantity: Decimal,
    pub unit: Option<String>,
    pub estimated_unit_price: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requisitions::Entity",
        from = "Column::RequisitionId",
        to = "super::requisitions::Column::Id"
    )]
    Requisitions,
}

impl Related<super::requisitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requisitions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
