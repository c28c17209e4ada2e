//! `SeaORM` Entity for documents table.
//!
//! Document metadata. File bytes live in external storage.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: Option<i64>,
    pub uploaded_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ocr_jobs::Entity")]
    OcrJobs,
}

impl Related<super::ocr_jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OcrJobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
