//! `SeaORM` Entity for vehicles table.
//!
//! Fleet vehicles and mobile plant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub registration: String,
    pub fleet_number: Option<String>,
    pub make: String,
    pub model_name: String,
    pub year: Option<i32>,
    pub vehicle_type: String,
    pub status: String,
    pub odometer: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fleet_costs::Entity")]
    FleetCosts,
    #[sea_orm(has_many = "super::fleet_documents::Entity")]
    FleetDocuments,
}

impl Related<super::fleet_costs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetCosts.def()
    }
}

impl Related<super::fleet_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetDocuments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
