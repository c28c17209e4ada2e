//! Incident types and transitions.

use super::error::SafetyError;
use crate::macros::string_enum;

string_enum! {
    /// Incident severity.
    pub enum IncidentSeverity {
        /// First aid or less.
        Low => "LOW",
        /// Medical treatment.
        Medium => "MEDIUM",
        /// Lost time injury or significant damage.
        High => "HIGH",
        /// Fatality or major event.
        Critical => "CRITICAL",
    }
}

string_enum! {
    /// Incident category.
    pub enum IncidentType {
        /// Personal injury.
        Injury => "INJURY",
        /// Near miss.
        NearMiss => "NEAR_MISS",
        /// Property damage.
        PropertyDamage => "PROPERTY_DAMAGE",
        /// Environmental release.
        Environmental => "ENVIRONMENTAL",
        /// Equipment failure.
        EquipmentFailure => "EQUIPMENT_FAILURE",
        /// Anything else.
        Other => "OTHER",
    }
}

string_enum! {
    /// Incident lifecycle.
    pub enum IncidentStatus {
        /// Logged.
        Reported => "REPORTED",
        /// Under investigation.
        Investigating => "INVESTIGATING",
        /// Corrective actions recorded.
        Resolved => "RESOLVED",
        /// Signed off.
        Closed => "CLOSED",
    }
}

/// Stateless incident transitions.
pub struct IncidentService;

impl IncidentService {
    fn step(
        current: IncidentStatus,
        from: IncidentStatus,
        to: IncidentStatus,
    ) -> Result<IncidentStatus, SafetyError> {
        if current == from {
            Ok(to)
        } else {
            Err(SafetyError::InvalidTransition { from: current, to })
        }
    }

    /// Reported → Investigating.
    pub fn start_investigation(current: IncidentStatus) -> Result<IncidentStatus, SafetyError> {
        Self::step(current, IncidentStatus::Reported, IncidentStatus::Investigating)
    }

    /// Investigating → Resolved.
    pub fn resolve(current: IncidentStatus) -> Result<IncidentStatus, SafetyError> {
        Self::step(current, IncidentStatus::Investigating, IncidentStatus::Resolved)
    }

    /// Resolved → Closed.
    pub fn close(current: IncidentStatus) -> Result<IncidentStatus, SafetyError> {
        Self::step(current, IncidentStatus::Resolved, IncidentStatus::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let s = IncidentService::start_investigation(IncidentStatus::Reported).unwrap();
        let s = IncidentService::resolve(s).unwrap();
        assert_eq!(IncidentService::close(s).unwrap(), IncidentStatus::Closed);
    }

    #[test]
    fn test_cannot_skip_investigation() {
        let err = IncidentService::resolve(IncidentStatus::Reported).unwrap_err();
        assert!(err.to_string().contains("REPORTED"));
        assert!(IncidentService::close(IncidentStatus::Investigating).is_err());
        assert!(IncidentService::start_investigation(IncidentStatus::Closed).is_err());
    }
}
