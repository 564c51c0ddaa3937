//! Task Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::EmployeeId;
use super::serde_helpers;

/// Task ID type
pub type TaskId = RecordId;

/// Task status. The set is closed, but transition order is not enforced:
/// any authorized update may set any status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Task model matching the `task` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: EmployeeId,
    #[serde(default)]
    pub created_at: i64,
}

/// Create task payload (admin only)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub employee_id: String,
}

/// Update task payload (admin only, all fields optional)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub employee_id: Option<String>,
}

/// Task row joined with its employee's name (listing queries)
#[derive(Debug, Clone, Deserialize)]
pub struct TaskWithEmployee {
    #[serde(with = "serde_helpers::record_id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: EmployeeId,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// API shape for a task (camelCase, employee name populated when joined)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub created_at: i64,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            title: task.title,
            description: task.description,
            status: task.status,
            employee_id: task.employee.to_string(),
            employee_name: None,
            created_at: task.created_at,
        }
    }
}

impl From<TaskWithEmployee> for TaskResponse {
    fn from(task: TaskWithEmployee) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title,
            description: task.description,
            status: task.status,
            employee_id: task.employee.to_string(),
            employee_name: task.employee_name,
            created_at: task.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_hyphen() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, TaskStatus::Completed);
    }

    #[test]
    fn status_rejects_unknown_spellings() {
        // "inProgress" is a known client-side misspelling; the API only
        // accepts the hyphenated form.
        assert!(serde_json::from_str::<TaskStatus>("\"inProgress\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"done\"").is_err());
    }

    #[test]
    fn create_payload_accepts_camel_case() {
        let payload: TaskCreate = serde_json::from_str(
            r#"{"title":"Ship it","employeeId":"employee:alice","status":"in-progress"}"#,
        )
        .unwrap();
        assert_eq!(payload.employee_id, "employee:alice");
        assert_eq!(payload.status, Some(TaskStatus::InProgress));
        assert_eq!(payload.description, None);
    }
}
