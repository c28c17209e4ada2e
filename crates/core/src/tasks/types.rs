//! Task domain types.

use crate::macros::string_enum;

string_enum! {
    /// Task lifecycle status.
    pub enum TaskStatus {
        /// Not started.
        Todo => "TODO",
        /// Being worked on.
        InProgress => "IN_PROGRESS",
        /// Waiting on something external.
        Blocked => "BLOCKED",
        /// Finished.
        Done => "DONE",
        /// Abandoned.
        Cancelled => "CANCELLED",
    }
}

string_enum! {
    /// Task priority.
    pub enum TaskPriority {
        /// Low.
        Low => "LOW",
        /// Medium.
        Medium => "MEDIUM",
        /// High.
        High => "HIGH",
        /// Drop everything.
        Critical => "CRITICAL",
    }
}

impl TaskStatus {
    /// Returns true while the task can still be worked on.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Todo | Self::InProgress | Self::Blocked)
    }
}
