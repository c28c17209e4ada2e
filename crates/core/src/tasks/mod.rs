//! Task board.
//!
//! # Modules
//!
//! - `types` - Task status and priority
//! - `service` - Status transitions
//! - `requests` - Create and transition payloads

pub mod error;
pub mod requests;
pub mod service;
pub mod types;

pub use error::TaskError;
pub use requests::{CreateTaskRequest, NewTask, UpdateTaskStatusRequest};
pub use service::TaskService;
pub use types::{TaskPriority, TaskStatus};
