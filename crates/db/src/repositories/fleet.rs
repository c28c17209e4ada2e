//! Vehicle, fleet cost and fleet document repository.

use chrono::{Days, NaiveDate, Utc};
use ridgeline_core::fleet::{
    CostSummary, EXPIRY_WARNING_DAYS, FleetCostType, FleetDocumentStatus, FleetDocumentType,
    FleetError, FleetService, NewFleetCost, NewFleetDocument, NewVehicle, VehicleStatus,
    VehicleType,
};
use ridgeline_core::validation::{ListQuery, Unfiltered};
use ridgeline_shared::types::PageResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::support::{decode, fetch_page, search_condition};
use crate::entities::{fleet_costs, fleet_documents, vehicles};

fn db_err(e: DbErr) -> FleetError {
    FleetError::Database(e.to_string())
}

/// A fleet document with its status as of today.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetDocumentView {
    /// Stored record.
    #[serde(flatten)]
    pub document: fleet_documents::Model,
    /// Derived from `expiresOn`.
    pub status: FleetDocumentStatus,
}

/// Fleet persistence.
#[derive(Debug, Clone)]
pub struct FleetRepository {
    db: DatabaseConnection,
}

impl FleetRepository {
    /// Creates a new fleet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a vehicle.
    ///
    /// # Errors
    ///
    /// `DuplicateRegistration` if the registration is taken.
    pub async fn create_vehicle(&self, input: NewVehicle) -> Result<vehicles::Model, FleetError> {
        let existing = vehicles::Entity::find()
            .filter(vehicles::Column::Registration.eq(&input.registration))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(FleetError::DuplicateRegistration(input.registration));
        }

        let now = Utc::now().into();
        let vehicle = vehicles::ActiveModel {
            id: Set(Uuid::new_v4()),
            registration: Set(input.registration),
            fleet_number: Set(input.fleet_number),
            make: Set(input.make),
            model_name: Set(input.model),
            year: Set(input.year.and_then(|y| i32::try_from(y).ok())),
            vehicle_type: Set(input.kind.as_str().to_string()),
            status: Set(VehicleStatus::Active.as_str().to_string()),
            odometer: Set(input.odometer),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(vehicle_id = %vehicle.id, registration = %vehicle.registration, "Vehicle registered");
        Ok(vehicle)
    }

    /// Lists vehicles by status and type.
    pub async fn list_vehicles(
        &self,
        query: &ListQuery<VehicleStatus, VehicleType>,
    ) -> Result<PageResponse<vehicles::Model>, FleetError> {
        let mut select = vehicles::Entity::find().order_by_asc(vehicles::Column::Registration);
        if let Some(status) = query.status {
            select = select.filter(vehicles::Column::Status.eq(status.as_str()));
        }
        if let Some(kind) = query.kind {
            select = select.filter(vehicles::Column::VehicleType.eq(kind.as_str()));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[
                    vehicles::Column::Registration,
                    vehicles::Column::FleetNumber,
                    vehicles::Column::Make,
                    vehicles::Column::ModelName,
                ],
                term,
            ));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Fetches a vehicle.
    pub async fn get_vehicle(&self, id: Uuid) -> Result<vehicles::Model, FleetError> {
        vehicles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(FleetError::VehicleNotFound(id))
    }

    /// Records a running cost.
    ///
    /// # Errors
    ///
    /// - `VehicleNotFound`
    /// - `VehicleRetired` for retired vehicles
    pub async fn record_cost(
        &self,
        recorded_by: Uuid,
        input: NewFleetCost,
    ) -> Result<fleet_costs::Model, FleetError> {
        let vehicle = self.get_vehicle(input.vehicle_id).await?;
        let status: VehicleStatus =
            decode(&vehicle.status).map_err(|e| FleetError::Database(e.to_string()))?;
        if status == VehicleStatus::Retired {
            return Err(FleetError::VehicleRetired(vehicle.id));
        }

        let cost = fleet_costs::ActiveModel {
            id: Set(Uuid::new_v4()),
            vehicle_id: Set(input.vehicle_id),
            cost_type: Set(input.kind.as_str().to_string()),
            amount: Set(input.amount),
            currency: Set(input.currency),
            incurred_on: Set(input.incurred_on),
            litres: Set(input.litres),
            odometer: Set(input.odometer),
            description: Set(input.description),
            recorded_by: Set(recorded_by),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        // Keep the vehicle's odometer at the highest reading seen.
        if let Some(reading) = cost.odometer
            && reading > vehicle.odometer
        {
            let mut active: vehicles::ActiveModel = vehicle.into();
            active.odometer = Set(reading);
            active.updated_at = Set(Utc::now().into());
            active.update(&self.db).await.map_err(db_err)?;
        }

        info!(
            fleet_cost_id = %cost.id,
            vehicle_id = %cost.vehicle_id,
            cost_type = %cost.cost_type,
            amount = %cost.amount,
            "Fleet cost recorded"
        );
        Ok(cost)
    }

    /// Lists costs, newest first, optionally for one vehicle.
    pub async fn list_costs(
        &self,
        query: &ListQuery<Unfiltered, FleetCostType>,
        vehicle_id: Option<Uuid>,
    ) -> Result<PageResponse<fleet_costs::Model>, FleetError> {
        let mut select = fleet_costs::Entity::find().order_by_desc(fleet_costs::Column::IncurredOn);
        if let Some(kind) = query.kind {
            select = select.filter(fleet_costs::Column::CostType.eq(kind.as_str()));
        }
        if let Some(vehicle_id) = vehicle_id {
            select = select.filter(fleet_costs::Column::VehicleId.eq(vehicle_id));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(&[fleet_costs::Column::Description], term));
        }
        fetch_page(&self.db, select, query.page).await.map_err(db_err)
    }

    /// Totals costs per type, optionally for one vehicle.
    pub async fn cost_summary(&self, vehicle_id: Option<Uuid>) -> Result<CostSummary, FleetError> {
        let mut select = fleet_costs::Entity::find();
        if let Some(vehicle_id) = vehicle_id {
            select = select.filter(fleet_costs::Column::VehicleId.eq(vehicle_id));
        }
        let costs = select.all(&self.db).await.map_err(db_err)?;

        let typed = costs
            .into_iter()
            .map(|c| {
                decode::<FleetCostType>(&c.cost_type)
                    .map(|kind| (kind, c.amount))
                    .map_err(|e| FleetError::Database(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FleetService::summarize(typed))
    }

    /// Records a compliance document.
    pub async fn record_document(
        &self,
        recorded_by: Uuid,
        input: NewFleetDocument,
    ) -> Result<FleetDocumentView, FleetError> {
        self.get_vehicle(input.vehicle_id).await?;

        let document = fleet_documents::ActiveModel {
            id: Set(Uuid::new_v4()),
            vehicle_id: Set(input.vehicle_id),
            document_type: Set(input.kind.as_str().to_string()),
            document_number: Set(input.document_number),
            issued_on: Set(input.issued_on),
            expires_on: Set(input.expires_on),
            file_url: Set(input.file_url),
            recorded_by: Set(recorded_by),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!(
            fleet_document_id = %document.id,
            vehicle_id = %document.vehicle_id,
            expires_on = %document.expires_on,
            "Fleet document recorded"
        );
        Ok(with_status(document, Utc::now().date_naive()))
    }

    /// Lists documents by derived status and type, soonest expiry first.
    pub async fn list_documents(
        &self,
        query: &ListQuery<FleetDocumentStatus, FleetDocumentType>,
        vehicle_id: Option<Uuid>,
    ) -> Result<PageResponse<FleetDocumentView>, FleetError> {
        let today = Utc::now().date_naive();
        let warning_end = today
            .checked_add_days(Days::new(EXPIRY_WARNING_DAYS.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX);

        let mut select =
            fleet_documents::Entity::find().order_by_asc(fleet_documents::Column::ExpiresOn);
        select = match query.status {
            Some(FleetDocumentStatus::Expired) => {
                select.filter(fleet_documents::Column::ExpiresOn.lt(today))
            }
            Some(FleetDocumentStatus::ExpiringSoon) => {
                select.filter(fleet_documents::Column::ExpiresOn.between(today, warning_end))
            }
            Some(FleetDocumentStatus::Valid) => {
                select.filter(fleet_documents::Column::ExpiresOn.gt(warning_end))
            }
            None => select,
        };
        if let Some(kind) = query.kind {
            select = select.filter(fleet_documents::Column::DocumentType.eq(kind.as_str()));
        }
        if let Some(vehicle_id) = vehicle_id {
            select = select.filter(fleet_documents::Column::VehicleId.eq(vehicle_id));
        }
        if let Some(term) = &query.search {
            select = select.filter(search_condition(
                &[fleet_documents::Column::DocumentNumber],
                term,
            ));
        }

        let page = fetch_page(&self.db, select, query.page).await.map_err(db_err)?;
        Ok(page.map(|d| with_status(d, today)))
    }
}

fn with_status(document: fleet_documents::Model, today: NaiveDate) -> FleetDocumentView {
    let status = FleetService::document_status(document.expires_on, today);
    FleetDocumentView { document, status }
}
