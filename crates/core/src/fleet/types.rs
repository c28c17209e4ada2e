//! Fleet domain types.

use crate::macros::string_enum;

string_enum! {
    /// Vehicle class.
    pub enum VehicleType {
        /// Haul truck.
        HaulTruck => "HAUL_TRUCK",
        /// Light delivery vehicle.
        LightVehicle => "LIGHT_VEHICLE",
        /// Excavator.
        Excavator => "EXCAVATOR",
        /// Front-end loader.
        Loader => "LOADER",
        /// Bulldozer.
        Dozer => "DOZER",
        /// Personnel carrier.
        Bus => "BUS",
        /// Anything else.
        Other => "OTHER",
    }
}

string_enum! {
    /// Vehicle availability.
    pub enum VehicleStatus {
        /// In service.
        Active => "ACTIVE",
        /// In the workshop.
        Maintenance => "MAINTENANCE",
        /// Out of service permanently.
        Retired => "RETIRED",
    }
}

string_enum! {
    /// Category of running cost.
    pub enum FleetCostType {
        /// Diesel and petrol.
        Fuel => "FUEL",
        /// Scheduled service.
        Maintenance => "MAINTENANCE",
        /// Breakdown repair.
        Repair => "REPAIR",
        /// Tyres.
        Tyres => "TYRES",
        /// Insurance premium.
        Insurance => "INSURANCE",
        /// Licence and registration fees.
        Licensing => "LICENSING",
        /// Anything else.
        Other => "OTHER",
    }
}

string_enum! {
    /// Kind of compliance document.
    pub enum FleetDocumentType {
        /// Vehicle registration.
        Registration => "REGISTRATION",
        /// Insurance certificate.
        Insurance => "INSURANCE",
        /// Roadworthy certificate.
        Roadworthy => "ROADWORTHY",
        /// Site or operating permit.
        Permit => "PERMIT",
        /// Service record.
        ServiceRecord => "SERVICE_RECORD",
        /// Anything else.
        Other => "OTHER",
    }
}

string_enum! {
    /// Status derived from a document's expiry date.
    pub enum FleetDocumentStatus {
        /// More than the warning window left.
        Valid => "VALID",
        /// Expires within the warning window.
        ExpiringSoon => "EXPIRING_SOON",
        /// Past its expiry date.
        Expired => "EXPIRED",
    }
}
