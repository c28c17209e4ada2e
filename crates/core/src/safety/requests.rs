//! Incident payloads.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::incident::{IncidentSeverity, IncidentType};
use crate::validation::{FieldErrors, MIN_NARRATIVE_LENGTH, Validate, ValidationErrors};

/// Payload for `POST /safety/incidents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportIncidentRequest {
    /// Short title.
    pub title: Option<String>,
    /// What happened.
    pub description: Option<String>,
    /// Category.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Severity.
    pub severity: Option<String>,
    /// Where it happened.
    pub location: Option<String>,
    /// When it happened.
    pub occurred_on: Option<String>,
    /// Whether anyone was hurt.
    pub injuries_reported: Option<bool>,
}

/// A validated incident report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Category.
    pub kind: IncidentType,
    /// Severity.
    pub severity: IncidentSeverity,
    /// Location.
    pub location: String,
    /// Date.
    pub occurred_on: NaiveDate,
    /// Injuries.
    pub injuries_reported: bool,
}

impl Validate for ReportIncidentRequest {
    type Output = NewIncident;

    fn validate(self) -> Result<NewIncident, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let title = errs.required_text("title", self.title.as_deref());
        let description =
            errs.min_length("description", self.description.as_deref(), MIN_NARRATIVE_LENGTH);
        let kind = errs.enum_value::<IncidentType>("type", self.kind.as_deref());
        let severity = errs.enum_value::<IncidentSeverity>("severity", self.severity.as_deref());
        let location = errs.required_text("location", self.location.as_deref());
        let occurred_on = errs.date("occurredOn", self.occurred_on.as_deref());

        match (title, description, kind, severity, location, occurred_on) {
            (
                Some(title),
                Some(description),
                Some(kind),
                Some(severity),
                Some(location),
                Some(occurred_on),
            ) if errs.is_empty() => Ok(NewIncident {
                title,
                description,
                kind,
                severity,
                location,
                occurred_on,
                injuries_reported: self.injuries_reported.unwrap_or(false),
            }),
            _ => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /safety/incidents/{id}/investigate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignInvestigatorRequest {
    /// User leading the investigation.
    pub investigator_id: Option<String>,
}

impl Validate for AssignInvestigatorRequest {
    type Output = Uuid;

    fn validate(self) -> Result<Uuid, ValidationErrors> {
        let mut errs = FieldErrors::new();
        match errs.uuid("investigatorId", self.investigator_id.as_deref()) {
            Some(id) => Ok(id),
            None => Err(errs.into_errors()),
        }
    }
}

/// Payload for `POST /safety/incidents/{id}/resolve`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveIncidentRequest {
    /// Corrective and preventive actions taken.
    pub corrective_actions: Option<String>,
    /// Root cause finding.
    pub root_cause: Option<String>,
}

impl Validate for ResolveIncidentRequest {
    type Output = (String, Option<String>);

    fn validate(self) -> Result<(String, Option<String>), ValidationErrors> {
        let mut errs = FieldErrors::new();
        let actions = errs.min_length(
            "correctiveActions",
            self.corrective_actions.as_deref(),
            MIN_NARRATIVE_LENGTH,
        );
        match actions {
            Some(actions) => Ok((actions, FieldErrors::optional_text(self.root_cause.as_deref()))),
            None => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_incident() {
        let incident = ReportIncidentRequest {
            title: Some("Rock fall at ramp 3".into()),
            description: Some("Loose rock fell from the highwall onto the haul road".into()),
            kind: Some("near_miss".into()),
            severity: Some("HIGH".into()),
            location: Some("Pit 2, ramp 3".into()),
            occurred_on: Some("2026-03-04".into()),
            injuries_reported: None,
        }
        .validate()
        .unwrap();
        assert_eq!(incident.kind, IncidentType::NearMiss);
        assert!(!incident.injuries_reported);
    }

    #[test]
    fn test_short_description_rejected() {
        let errs = ReportIncidentRequest {
            description: Some("rock fell".into()),
            ..ReportIncidentRequest::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("description"), Some("min_length"));
        assert_eq!(errs.code_for("severity"), Some("required"));
    }

    #[test]
    fn test_resolution_requires_narrative() {
        let errs = ResolveIncidentRequest {
            corrective_actions: Some("scaled wall".into()),
            root_cause: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errs.code_for("correctiveActions"), Some("min_length"));
    }
}
