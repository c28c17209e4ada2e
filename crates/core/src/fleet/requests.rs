//! Fleet request payloads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::types::{FleetCostType, FleetDocumentType, VehicleType};
use crate::validation::{FieldErrors, LooseValue, Validate, ValidationErrors};

/// Payload for `POST /fleet/vehicles`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    /// Registration plate.
    pub registration: Option<String>,
    /// Internal fleet number.
    pub fleet_number: Option<String>,
    /// Manufacturer.
    pub make: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Model year.
    pub year: Option<String>,
    /// Vehicle class.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Odometer or hour-meter reading.
    pub odometer: Option<LooseValue>,
}

/// A validated vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    /// Upper-cased registration.
    pub registration: String,
    /// Fleet number.
    pub fleet_number: Option<String>,
    /// Make.
    pub make: String,
    /// Model.
    pub model: String,
    /// Year.
    pub year: Option<u32>,
    /// Class.
    pub kind: VehicleType,
    /// Odometer.
    pub odometer: Decimal,
}

impl Validate for CreateVehicleRequest {
    type Output = NewVehicle;

    fn validate(self) -> Result<NewVehicle, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let registration = errs.required_text("registration", self.registration.as_deref());
        let make = errs.required_text("make", self.make.as_deref());
        let model = errs.required_text("model", self.model.as_deref());
        let year = errs.integer_in_range("year", self.year.as_deref(), 1950, 2100);
        let kind = errs.enum_value::<VehicleType>("type", self.kind.as_deref());
        let odometer = match &self.odometer {
            Some(v) => errs.non_negative_decimal("odometer", Some(v)),
            None => Some(Decimal::ZERO),
        };

        match (registration, make, model, kind, odometer) {
            (Some(registration), Some(make), Some(model), Some(kind), Some(odometer))
                if errs.is_empty() =>
            {
                Ok(NewVehicle {
                    registration: registration.to_ascii_uppercase(),
                    fleet_number: FieldErrors::optional_text(self.fleet_number.as_deref()),
                    make,
                    model,
                    year,
                    kind,
                    odometer,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /fleet/costs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFleetCostRequest {
    /// Vehicle.
    pub vehicle_id: Option<String>,
    /// Cost type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Amount.
    pub amount: Option<LooseValue>,
    /// Currency code.
    pub currency: Option<String>,
    /// Date incurred.
    pub incurred_on: Option<String>,
    /// Litres, for fuel.
    pub litres: Option<LooseValue>,
    /// Odometer reading at the time.
    pub odometer: Option<LooseValue>,
    /// Description.
    pub description: Option<String>,
}

/// A validated fleet cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFleetCost {
    /// Vehicle.
    pub vehicle_id: Uuid,
    /// Cost type.
    pub kind: FleetCostType,
    /// Amount.
    pub amount: Decimal,
    /// Currency.
    pub currency: String,
    /// Date incurred.
    pub incurred_on: NaiveDate,
    /// Litres.
    pub litres: Option<Decimal>,
    /// Odometer.
    pub odometer: Option<Decimal>,
    /// Description.
    pub description: Option<String>,
}

impl Validate for RecordFleetCostRequest {
    type Output = NewFleetCost;

    fn validate(self) -> Result<NewFleetCost, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let vehicle_id = errs.uuid("vehicleId", self.vehicle_id.as_deref());
        let kind = errs.enum_value::<FleetCostType>("type", self.kind.as_deref());
        let amount = errs.positive_decimal("amount", self.amount.as_ref());
        let currency = errs.currency("currency", self.currency.as_deref());
        let incurred_on = errs.date("incurredOn", self.incurred_on.as_deref());
        let litres = self
            .litres
            .as_ref()
            .and_then(|v| errs.positive_decimal("litres", Some(v)));
        let odometer = self
            .odometer
            .as_ref()
            .and_then(|v| errs.non_negative_decimal("odometer", Some(v)));

        match (vehicle_id, kind, amount, currency, incurred_on) {
            (Some(vehicle_id), Some(kind), Some(amount), Some(currency), Some(incurred_on))
                if errs.is_empty() =>
            {
                Ok(NewFleetCost {
                    vehicle_id,
                    kind,
                    amount,
                    currency,
                    incurred_on,
                    litres,
                    odometer,
                    description: FieldErrors::optional_text(self.description.as_deref()),
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /fleet/documents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFleetDocumentRequest {
    /// Vehicle.
    pub vehicle_id: Option<String>,
    /// Document type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Certificate or policy number.
    pub document_number: Option<String>,
    /// Issue date.
    pub issued_on: Option<String>,
    /// Expiry date.
    pub expires_on: Option<String>,
    /// Link to the scanned document.
    pub file_url: Option<String>,
}

/// A validated fleet document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFleetDocument {
    /// Vehicle.
    pub vehicle_id: Uuid,
    /// Type.
    pub kind: FleetDocumentType,
    /// Number.
    pub document_number: Option<String>,
    /// Issue date.
    pub issued_on: Option<NaiveDate>,
    /// Expiry date.
    pub expires_on: NaiveDate,
    /// File link.
    pub file_url: Option<String>,
}

impl Validate for RecordFleetDocumentRequest {
    type Output = NewFleetDocument;

    fn validate(self) -> Result<NewFleetDocument, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let vehicle_id = errs.uuid("vehicleId", self.vehicle_id.as_deref());
        let kind = errs.enum_value::<FleetDocumentType>("type", self.kind.as_deref());
        let issued_on = errs.optional_date("issuedOn", self.issued_on.as_deref());
        let expires_on = errs.date("expiresOn", self.expires_on.as_deref());
        if let (Some(issued), Some(expires)) = (issued_on, expires_on)
            && expires < issued
        {
            errs.add("expiresOn", "date_order", "expiresOn must not be before issuedOn");
        }
        let file_url = errs.optional_url("fileUrl", self.file_url.as_deref());

        match (vehicle_id, kind, expires_on) {
            (Some(vehicle_id), Some(kind), Some(expires_on)) if errs.is_empty() => {
                Ok(NewFleetDocument {
                    vehicle_id,
                    kind,
                    document_number: FieldErrors::optional_text(self.document_number.as_deref()),
                    issued_on,
                    expires_on,
                    file_url,
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_vehicle_validation() {
        let vehicle = CreateVehicleRequest {
            registration: Some("hx 42 gp".into()),
            make: Some("Caterpillar".into()),
            model: Some("777G".into()),
            year: Some("2021".into()),
            kind: Some("haul_truck".into()),
            ..CreateVehicleRequest::default()
        }
        .validate()
        .unwrap();
        assert_eq!(vehicle.registration, "HX 42 GP");
        assert_eq!(vehicle.kind, VehicleType::HaulTruck);
        assert_eq!(vehicle.year, Some(2021));
    }

    #[test]
    fn test_fuel_cost() {
        let cost = RecordFleetCostRequest {
            vehicle_id: Some(Uuid::new_v4().to_string()),
            kind: Some("FUEL".into()),
            amount: Some("4200.00".into()),
            currency: Some("usd".into()),
            incurred_on: Some("2026-03-02".into()),
            litres: Some("2100".into()),
            ..RecordFleetCostRequest::default()
        }
        .validate()
        .unwrap();
        assert_eq!(cost.currency, "USD");
        assert_eq!(cost.litres, Some(dec!(2100)));
    }

    #[test]
    fn test_document_dates() {
        let errs = RecordFleetDocumentRequest {
            vehicle_id: Some(Uuid::new_v4().to_string()),
            kind: Some("INSURANCE".into()),
            issued_on: Some("2026-03-01".into()),
            expires_on: Some("2025-03-01".into()),
            file_url: Some("not a url".into()),
            ..RecordFleetDocumentRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("expiresOn"), Some("date_order"));
        assert_eq!(errs.code_for("fileUrl"), Some("url"));
    }
}
