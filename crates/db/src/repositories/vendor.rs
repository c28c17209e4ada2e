//! Vendor repository.

use chrono::Utc;
use ridgeline_core::procurement::{NewVendor, ProcurementError};
use ridgeline_core::validation::ListQuery;
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::info;
use uuid::Uuid;

use super::support::{fetch_page, search_condition};
use crate::entities::vendors;

fn db_err(e: DbErr) -> ProcurementError {
    ProcurementError::Database(e.to_string())
}

/// Vendor master data.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    db: DatabaseConnection,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a vendor. Codes are unique.
    pub async fn create(&self, input: NewVendor) -> Result<vendors::Model, ProcurementError> {
        let existing = vendors::Entity::find()
            .filter(vendors::Column::Code.eq(&input.code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(ProcurementError::DuplicateVendorCode(input.code));
        }

        let now = Utc::now().into();
        let vendor = vendors::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            contact_email: Set(input.contact_email),
            phone: Set(input.phone),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(vendor_id = %vendor.id, code = %vendor.code, "Vendor created");
        Ok(vendor)
    }

    /// Lists vendors, searching name and code.
    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<PageResponse<vendors::Model>, ProcurementError> {
        let mut select = vendors::Entity::find().order_by_asc(vendors::Column::Name);
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[vendors::Column::Name, vendors::Column::Code],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches one vendor.
    pub async fn get(&self, id: Uuid) -> Result<vendors::Model, ProcurementError> {
        vendors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(ProcurementError::VendorNotFound(id))
    }
}
