//! `SeaORM` Entity for vendor_invoice_lines table.
//!
//! Vendor invoice lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_invoice_lines")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vendor_invoice_id: Uuid,
    pub purchase_order_line_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub price_variance: Option<Decimal>,
    pub quantity_variance: Option<Decimal>,
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
