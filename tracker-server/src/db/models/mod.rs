//! Storage Models
//!
//! One module per table plus shared serde helpers. Models are the
//! snake_case storage shapes; the camelCase `*Response` types are what the
//! API serves.

pub mod employee;
pub mod serde_helpers;
pub mod task;
pub mod user;

pub use employee::{Employee, EmployeeCreate, EmployeeId, EmployeeResponse};
pub use task::{
    Task, TaskCreate, TaskId, TaskResponse, TaskStatus, TaskUpdate, TaskWithEmployee,
};
pub use user::{Role, User, UserCreate, UserId, UserResponse};
