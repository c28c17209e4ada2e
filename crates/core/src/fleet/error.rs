//! Fleet error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during fleet operations.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Registration number already in use.
    #[error("Vehicle with registration {0} already exists")]
    DuplicateRegistration(String),

    /// Costs cannot be booked against retired vehicles.
    #[error("Vehicle {0} is retired")]
    VehicleRetired(Uuid),

    /// Vehicle not found.
    #[error("Vehicle {0} not found")]
    VehicleNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl FleetError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateRegistration(_) | Self::VehicleRetired(_) => 409,
            Self::VehicleNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateRegistration(_) => "DUPLICATE_REGISTRATION",
            Self::VehicleRetired(_) => "VEHICLE_RETIRED",
            Self::VehicleNotFound(_) => "VEHICLE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
