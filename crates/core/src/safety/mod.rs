//! Safety incident reporting and investigation.
//!
//! Incidents move `REPORTED → INVESTIGATING → RESOLVED → CLOSED`.

pub mod error;
pub mod incident;
pub mod requests;

pub use error::SafetyError;
pub use incident::{IncidentService, IncidentSeverity, IncidentStatus, IncidentType};
pub use requests::{
    AssignInvestigatorRequest, NewIncident, ReportIncidentRequest, ResolveIncidentRequest,
};
