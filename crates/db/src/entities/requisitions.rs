//! `SeaORM` Entity for requisitions table.
//!
//! Internal purchase requests.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "requisitions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub requisition_number: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub justification: String,
    pub department: String,
    pub needed_by: Option<Date>,
    pub status: String,
    pub estimated_total: Decimal,
    pub requested_by: Uuid,
    pub submitted_at: Option<DateTimeWithTimeZone>,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "Text", nullable)]
    pub decision_notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::requisition_lines::Entity")]
    RequisitionLines,
}

impl Related<super::requisition_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequisitionLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
