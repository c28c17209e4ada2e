//! Vehicles, running costs and compliance documents.

pub mod error;
pub mod requests;
pub mod service;
pub mod types;

pub use error::FleetError;
pub use requests::{
    CreateVehicleRequest, NewFleetCost, NewFleetDocument, NewVehicle, RecordFleetCostRequest,
    RecordFleetDocumentRequest,
};
pub use service::{CostSummary, EXPIRY_WARNING_DAYS, FleetService};
pub use types::{FleetCostType, FleetDocumentStatus, FleetDocumentType, VehicleStatus, VehicleType};
