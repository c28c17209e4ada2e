//! `SeaORM` Entity for payments table.
//!
//! Payments against vendor invoices.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vendor_invoice_id: Uuid,
    pub amount: Decimal,
    pub method: String,
    pub reference: Option<String>,
    pub paid_on: Date,
    pub recorded_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor_invoices::Entity",
        from = "Column::VendorInvoiceId",
        to = "super::vendor_invoices::Column::Id"
    )]
    VendorInvoices,
}

impl Related<super::vendor_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VendorInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
