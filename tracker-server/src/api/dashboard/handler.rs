//! Dashboard API Handlers

use axum::{Json, extract::State};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::db::models::Role;
use crate::db::repository::{EmployeeRepository, TaskRepository};
use crate::db::scope::{TaskFilter, TaskListQuery};
use crate::utils::AppResult;

// ============================================================================
// Response Types
// ============================================================================

/// Per-employee breakdown (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTaskStats {
    pub employee_id: String,
    pub employee_name: String,
    pub task_count: i64,
    pub completed: i64,
    pub completion_rate: i64,
}

/// Daily activity data point (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPoint {
    pub date: String,
    pub tasks_created: i64,
    pub tasks_completed: i64,
}

/// Role-scoped statistics response
///
/// The admin-only members are omitted entirely for employees — not
/// returned as empty arrays or zeroes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_tasks: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub pending: i64,
    pub completion_rate: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_per_employee: Option<Vec<EmployeeTaskStats>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_activity: Option<Vec<ActivityPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_employees: Option<i64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/dashboard - role-scoped statistics
///
/// Base counts run over the same scoped filter as task listing, so an
/// employee's dashboard covers exactly the tasks they can list.
pub async fn get_dashboard(
    State(state): State<ServerState>,
    ctx: AuthContext,
) -> AppResult<Json<DashboardResponse>> {
    let filter = TaskFilter::scoped(&ctx, &TaskListQuery::default())?;
    let tasks = TaskRepository::new(state.get_db());

    let counts = tasks.count_by_status(&filter).await?;

    let mut response = DashboardResponse {
        total_tasks: counts.total,
        completed: counts.completed,
        in_progress: counts.in_progress,
        pending: counts.pending,
        completion_rate: completion_rate(counts.completed, counts.total),
        tasks_per_employee: None,
        recent_activity: None,
        total_employees: None,
    };

    match ctx.role {
        Role::Employee => {}
        Role::Admin => {
            let per_employee = tasks.stats_per_employee().await?;
            response.tasks_per_employee = Some(
                per_employee
                    .into_iter()
                    .map(|row| EmployeeTaskStats {
                        employee_id: row.employee_id,
                        employee_name: row.employee_name.unwrap_or_default(),
                        completion_rate: completion_rate(row.completed, row.task_count),
                        task_count: row.task_count,
                        completed: row.completed,
                    })
                    .collect(),
            );

            let since = (Utc::now() - Duration::days(7)).timestamp_millis();
            response.recent_activity = Some(
                tasks
                    .recent_activity(since)
                    .await?
                    .into_iter()
                    .map(|row| ActivityPoint {
                        date: row.date,
                        tasks_created: row.tasks_created,
                        tasks_completed: row.tasks_completed,
                    })
                    .collect(),
            );

            let employees = EmployeeRepository::new(state.get_db());
            response.total_employees = Some(employees.count().await?);
        }
    }

    Ok(Json(response))
}

/// `round(completed / total * 100)`, defined as 0 when total is 0
fn completion_rate(completed: i64, total: i64) -> i64 {
    if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_rate_rounds() {
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 2), 50);
        assert_eq!(completion_rate(3, 3), 100);
    }

    #[test]
    fn completion_rate_of_empty_set_is_zero() {
        assert_eq!(completion_rate(0, 0), 0);
    }

    #[test]
    fn employee_response_omits_admin_members() {
        let response = DashboardResponse {
            total_tasks: 3,
            completed: 1,
            in_progress: 1,
            pending: 1,
            completion_rate: 33,
            tasks_per_employee: None,
            recent_activity: None,
            total_employees: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalTasks"], 3);
        assert_eq!(json["completionRate"], 33);
        assert!(json.get("tasksPerEmployee").is_none());
        assert!(json.get("recentActivity").is_none());
        assert!(json.get("totalEmployees").is_none());
    }
}
