//! Leave requests.

pub mod error;
pub mod leave;
pub mod requests;

pub use error::HrError;
pub use leave::{LeaveService, LeaveStatus, LeaveType, working_days};
pub use requests::{CreateLeaveRequest, NewLeaveRequest};
