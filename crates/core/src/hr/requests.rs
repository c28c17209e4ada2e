//! Leave request payloads.

use chrono::NaiveDate;
use serde::Deserialize;

use super::leave::{LeaveType, working_days};
use crate::validation::{FieldErrors, Validate, ValidationErrors};

/// Payload for `POST /hr/leave-requests`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    /// Leave type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// First day of leave.
    pub start_date: Option<String>,
    /// Last day of leave.
    pub end_date: Option<String>,
    /// Optional note to the approver.
    pub reason: Option<String>,
}

/// A validated leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaveRequest {
    /// Leave type.
    pub kind: LeaveType,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Working days covered.
    pub working_days: u32,
    /// Note.
    pub reason: Option<String>,
}

impl Validate for CreateLeaveRequest {
    type Output = NewLeaveRequest;

    fn validate(self) -> Result<NewLeaveRequest, ValidationErrors> {
        let mut errs = FieldErrors::new();
        let kind = errs.enum_value::<LeaveType>("type", self.kind.as_deref());
        let start_date = errs.date("startDate", self.start_date.as_deref());
        let end_date = errs.date("endDate", self.end_date.as_deref());

        let mut days = 0;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errs.add("endDate", "date_order", "endDate must not be before startDate");
            } else {
                days = working_days(start, end);
                if days == 0 {
                    errs.add(
                        "endDate",
                        "no_working_days",
                        "leave must cover at least one working day",
                    );
                }
            }
        }

        match (kind, start_date, end_date) {
            (Some(kind), Some(start_date), Some(end_date)) if errs.is_empty() => {
                Ok(NewLeaveRequest {
                    kind,
                    start_date,
                    end_date,
                    working_days: days,
                    reason: FieldErrors::optional_text(self.reason.as_deref()),
                })
            }
            _ => Err(errs.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leave(start: &str, end: &str) -> CreateLeaveRequest {
        CreateLeaveRequest {
            kind: Some("annual".into()),
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            reason: None,
        }
    }

    #[test]
    fn test_counts_working_days() {
        let req = leave("2026-03-02", "2026-03-13").validate().unwrap();
        assert_eq!(req.working_days, 10);
        assert_eq!(req.kind, LeaveType::Annual);
    }

    #[test]
    fn test_end_before_start() {
        let errs = leave("2026-03-13", "2026-03-02").validate().unwrap_err();
        assert_eq!(errs.code_for("endDate"), Some("date_order"));
    }

    #[test]
    fn test_weekend_only_rejected() {
        let errs = leave("2026-03-07", "2026-03-08").validate().unwrap_err();
        assert_eq!(errs.code_for("endDate"), Some("no_working_days"));
    }
}
