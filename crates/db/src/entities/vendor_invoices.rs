//! `SeaORM` Entity for vendor_invoices table.
//!
//! Vendor invoices with match and payment state.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_invoices")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub invoice_number: String,
    pub vendor_id: Uuid,
    pub purchase_order_id: Uuid,
    pub invoice_date: Date,
    pub due_date: Option<Date>,
    pub currency: String,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub match_status: String,
    pub payment_status: String,
    pub price_variance: Option<Decimal>,
    pub quantity_variance: Option<Decimal>,
    pub tolerance_used: Option<Decimal>,
    pub matched_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "Text", nullable)]
    pub override_notes: Option<String>,
    pub overridden_by: Option<Uuid>,
    pub overridden_at: Option<DateTimeWithTimeZone>,
    pub registered_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_orders::Entity",
        from = "Column::PurchaseOrderId",
        to = "super::purchase_orders::Column::Id"
    )]
    PurchaseOrders,
    #[sea_orm(has_many = "super::vendor_invoice_lines::Entity")]
    VendorInvoiceLines,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl Related<super::vendor_invoice_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VendorInvoiceLines.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
