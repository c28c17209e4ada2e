//! Leave types, working-day arithmetic and status transitions.

use chrono::{Datelike, NaiveDate, Weekday};
use uuid::Uuid;

use super::error::HrError;
use crate::macros::string_enum;

string_enum! {
    /// Kind of leave.
    pub enum LeaveType {
        /// Annual leave.
        Annual => "ANNUAL",
        /// Sick leave.
        Sick => "SICK",
        /// Family responsibility leave.
        FamilyResponsibility => "FAMILY_RESPONSIBILITY",
        /// Study leave.
        Study => "STUDY",
        /// Unpaid leave.
        Unpaid => "UNPAID",
    }
}

string_enum! {
    /// Leave request lifecycle.
    pub enum LeaveStatus {
        /// Awaiting a decision.
        Pending => "PENDING",
        /// Approved.
        Approved => "APPROVED",
        /// Rejected.
        Rejected => "REJECTED",
        /// Withdrawn by the requester.
        Cancelled => "CANCELLED",
    }
}

/// Monday–Friday days between `start` and `end`, inclusive. Zero if `end < start`.
#[must_use]
pub fn working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .fold(0, |n, _| n + 1)
}

/// Stateless leave transitions.
pub struct LeaveService;

impl LeaveService {
    /// Pending → Approved.
    pub fn approve(current: LeaveStatus) -> Result<LeaveStatus, HrError> {
        match current {
            LeaveStatus::Pending => Ok(LeaveStatus::Approved),
            _ => Err(HrError::InvalidTransition {
                from: current,
                to: LeaveStatus::Approved,
            }),
        }
    }

    /// Pending → Rejected.
    pub fn reject(current: LeaveStatus) -> Result<LeaveStatus, HrError> {
        match current {
            LeaveStatus::Pending => Ok(LeaveStatus::Rejected),
            _ => Err(HrError::InvalidTransition {
                from: current,
                to: LeaveStatus::Rejected,
            }),
        }
    }

    /// Pending → Cancelled, or Approved → Cancelled before the leave starts.
    /// Only the requester may cancel.
    pub fn cancel(
        current: LeaveStatus,
        requested_by: Uuid,
        actor: Uuid,
        start_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<LeaveStatus, HrError> {
        if requested_by != actor {
            return Err(HrError::NotRequester);
        }
        match current {
            LeaveStatus::Pending => Ok(LeaveStatus::Cancelled),
            LeaveStatus::Approved if start_date > today => Ok(LeaveStatus::Cancelled),
            LeaveStatus::Approved => Err(HrError::AlreadyStarted),
            _ => Err(HrError::InvalidTransition {
                from: current,
                to: LeaveStatus::Cancelled,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_working_days_skip_weekends() {
        // 2026-03-02 is a Monday.
        assert_eq!(working_days(d("2026-03-02"), d("2026-03-06")), 5);
        assert_eq!(working_days(d("2026-03-02"), d("2026-03-08")), 5);
        assert_eq!(working_days(d("2026-03-02"), d("2026-03-09")), 6);
        assert_eq!(working_days(d("2026-03-07"), d("2026-03-08")), 0);
        assert_eq!(working_days(d("2026-03-04"), d("2026-03-04")), 1);
    }

    #[test]
    fn test_working_days_reversed_range() {
        assert_eq!(working_days(d("2026-03-06"), d("2026-03-02")), 0);
    }

    #[test]
    fn test_cancel_rules() {
        let me = Uuid::new_v4();
        let today = d("2026-03-02");
        assert_eq!(
            LeaveService::cancel(LeaveStatus::Approved, me, me, d("2026-03-10"), today).unwrap(),
            LeaveStatus::Cancelled
        );
        assert!(matches!(
            LeaveService::cancel(LeaveStatus::Approved, me, me, today, today),
            Err(HrError::AlreadyStarted)
        ));
        assert!(matches!(
            LeaveService::cancel(LeaveStatus::Pending, me, Uuid::new_v4(), today, today),
            Err(HrError::NotRequester)
        ));
        assert!(matches!(
            LeaveService::cancel(LeaveStatus::Rejected, me, me, d("2026-03-10"), today),
            Err(HrError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_decisions_only_from_pending() {
        assert_eq!(LeaveService::approve(LeaveStatus::Pending).unwrap(), LeaveStatus::Approved);
        assert!(LeaveService::reject(LeaveStatus::Approved).is_err());
    }
}
