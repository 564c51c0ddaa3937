//! Employee Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Employee model matching the `employee` table
///
/// Referenced, never owned, by tasks and users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub name: String,
}

/// Create employee payload
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
}

/// API shape for an employee with its task count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub task_count: i64,
}
