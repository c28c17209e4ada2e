//! Task status transitions.

use uuid::Uuid;

use super::error::TaskError;
use super::types::TaskStatus;

/// Stateless service for task transitions.
pub struct TaskService;

impl TaskService {
    /// Checks whether a task may move from `from` to `to`.
    ///
    /// Valid transitions:
    /// - Todo → InProgress
    /// - InProgress → Done | Blocked
    /// - Blocked → InProgress
    /// - Done → InProgress (reopen)
    /// - any open status → Cancelled
    #[must_use]
    pub fn is_valid_transition(from: TaskStatus, to: TaskStatus) -> bool {
        use TaskStatus::{Blocked, Cancelled, Done, InProgress, Todo};
        matches!(
            (from, to),
            (Todo | Blocked | Done, InProgress)
                | (InProgress, Done | Blocked)
                | (Todo | InProgress | Blocked, Cancelled)
        )
    }

    /// Validates a transition requested by `actor`.
    pub fn transition(
        from: TaskStatus,
        to: TaskStatus,
        actor: Uuid,
        created_by: Uuid,
        assignee: Option<Uuid>,
    ) -> Result<TaskStatus, TaskError> {
        if actor != created_by && assignee != Some(actor) {
            return Err(TaskError::NotParticipant);
        }
        if !Self::is_valid_transition(from, to) {
            return Err(TaskError::InvalidTransition { from, to });
        }
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TaskStatus::Todo, TaskStatus::InProgress, true)]
    #[case(TaskStatus::InProgress, TaskStatus::Done, true)]
    #[case(TaskStatus::InProgress, TaskStatus::Blocked, true)]
    #[case(TaskStatus::Blocked, TaskStatus::InProgress, true)]
    #[case(TaskStatus::Done, TaskStatus::InProgress, true)]
    #[case(TaskStatus::Blocked, TaskStatus::Cancelled, true)]
    #[case(TaskStatus::Todo, TaskStatus::Done, false)]
    #[case(TaskStatus::Done, TaskStatus::Cancelled, false)]
    #[case(TaskStatus::Cancelled, TaskStatus::InProgress, false)]
    #[case(TaskStatus::Todo, TaskStatus::Todo, false)]
    fn test_transitions(#[case] from: TaskStatus, #[case] to: TaskStatus, #[case] ok: bool) {
        assert_eq!(TaskService::is_valid_transition(from, to), ok);
    }

    #[test]
    fn test_assignee_can_move_task() {
        let creator = Uuid::new_v4();
        let assignee = Uuid::new_v4();
        let result = TaskService::transition(
            TaskStatus::Todo,
            TaskStatus::InProgress,
            assignee,
            creator,
            Some(assignee),
        );
        assert_eq!(result.unwrap(), TaskStatus::InProgress);
    }

    #[test]
    fn test_outsider_is_rejected() {
        let result = TaskService::transition(
            TaskStatus::Todo,
            TaskStatus::InProgress,
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
        );
        assert!(matches!(result, Err(TaskError::NotParticipant)));
    }

    #[test]
    fn test_invalid_transition_reports_states() {
        let actor = Uuid::new_v4();
        let err = TaskService::transition(TaskStatus::Done, TaskStatus::Blocked, actor, actor, None)
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert!(err.to_string().contains("DONE"));
        assert!(err.to_string().contains("BLOCKED"));
    }
}
