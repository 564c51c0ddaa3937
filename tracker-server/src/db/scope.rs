//! Role-Scoped Query Filters
//!
//! Translates the request identity plus caller-supplied query parameters
//! into the storage filter that enforces data ownership: employees only
//! ever see their own tasks, admins see everything unless they narrow.

use serde::Deserialize;
use surrealdb::RecordId;

use crate::auth::AuthContext;
use crate::db::models::{EmployeeId, Role, TaskStatus};
use crate::utils::AppError;

/// Caller-supplied task list parameters (`GET /api/tasks?employeeId&status`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub employee_id: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Storage filter for tasks, narrowed by the caller's role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub employee: Option<EmployeeId>,
    pub status: Option<TaskStatus>,
    /// An employee-role user with no linked employee record owns nothing:
    /// the filter matches no rows instead of widening to all tasks.
    pub match_none: bool,
}

impl TaskFilter {
    /// Build the filter for a request.
    ///
    /// The identity context wins over caller parameters: an employee cannot
    /// widen or redirect the query by supplying a different employee id.
    /// Admins may narrow with `employeeId`; a malformed id is a 400.
    pub fn scoped(ctx: &AuthContext, query: &TaskListQuery) -> Result<Self, AppError> {
        let employee = match ctx.role {
            Role::Employee => match &ctx.employee_id {
                Some(id) => Some(id.clone()),
                None => {
                    return Ok(Self {
                        employee: None,
                        status: query.status,
                        match_none: true,
                    });
                }
            },
            Role::Admin => match &query.employee_id {
                Some(raw) => Some(parse_employee_id(raw)?),
                None => None,
            },
        };

        Ok(Self {
            employee,
            status: query.status,
            match_none: false,
        })
    }
}

fn parse_employee_id(raw: &str) -> Result<EmployeeId, AppError> {
    raw.parse::<RecordId>()
        .map_err(|_| AppError::validation_field("employeeId", "employeeId must be a valid id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_ctx(employee: Option<&str>) -> AuthContext {
        AuthContext {
            user_id: "user:u1".parse().unwrap(),
            role: Role::Employee,
            employee_id: employee.map(|id| id.parse().unwrap()),
        }
    }

    fn admin_ctx() -> AuthContext {
        AuthContext {
            user_id: "user:boss".parse().unwrap(),
            role: Role::Admin,
            employee_id: None,
        }
    }

    #[test]
    fn employee_scope_is_forced() {
        let ctx = employee_ctx(Some("employee:alice"));
        // The caller-supplied id must never redirect the query
        let query = TaskListQuery {
            employee_id: Some("employee:bob".into()),
            status: None,
        };
        let filter = TaskFilter::scoped(&ctx, &query).unwrap();
        assert_eq!(filter.employee, Some("employee:alice".parse().unwrap()));
        assert!(!filter.match_none);
    }

    #[test]
    fn unlinked_employee_matches_nothing() {
        let ctx = employee_ctx(None);
        let query = TaskListQuery {
            employee_id: Some("employee:bob".into()),
            status: None,
        };
        let filter = TaskFilter::scoped(&ctx, &query).unwrap();
        assert!(filter.match_none);
        assert_eq!(filter.employee, None);
    }

    #[test]
    fn admin_without_params_sees_all() {
        let filter = TaskFilter::scoped(&admin_ctx(), &TaskListQuery::default()).unwrap();
        assert_eq!(filter.employee, None);
        assert_eq!(filter.status, None);
        assert!(!filter.match_none);
    }

    #[test]
    fn admin_can_narrow_by_employee() {
        let query = TaskListQuery {
            employee_id: Some("employee:alice".into()),
            status: None,
        };
        let filter = TaskFilter::scoped(&admin_ctx(), &query).unwrap();
        assert_eq!(filter.employee, Some("employee:alice".parse().unwrap()));
    }

    #[test]
    fn admin_invalid_employee_id_is_rejected() {
        let query = TaskListQuery {
            employee_id: Some("definitely not an id".into()),
            status: None,
        };
        let err = TaskFilter::scoped(&admin_ctx(), &query).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn status_narrows_for_both_roles() {
        let query = TaskListQuery {
            employee_id: None,
            status: Some(TaskStatus::Completed),
        };
        let admin = TaskFilter::scoped(&admin_ctx(), &query).unwrap();
        assert_eq!(admin.status, Some(TaskStatus::Completed));

        let ctx = employee_ctx(Some("employee:alice"));
        let employee = TaskFilter::scoped(&ctx, &query).unwrap();
        assert_eq!(employee.status, Some(TaskStatus::Completed));
        assert_eq!(employee.employee, Some("employee:alice".parse().unwrap()));
    }
}
