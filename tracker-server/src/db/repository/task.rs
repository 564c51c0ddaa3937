//! Task Repository

use chrono::Utc;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Employee, EmployeeId, Task, TaskCreate, TaskId, TaskStatus, TaskUpdate, TaskWithEmployee,
};
use crate::db::scope::TaskFilter;

/// Status counts over a scoped filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusCounts {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub pending: i64,
}

/// Per-employee aggregation row (admin dashboard)
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeTaskRow {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub task_count: i64,
    pub completed: i64,
}

/// Per-day activity row (admin dashboard)
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRow {
    pub date: String,
    pub tasks_created: i64,
    pub tasks_completed: i64,
}

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List tasks for a scoped filter, newest first, employee name populated
    pub async fn find_scoped(&self, filter: &TaskFilter) -> RepoResult<Vec<TaskWithEmployee>> {
        if filter.match_none {
            return Ok(Vec::new());
        }

        let mut sql = String::from("SELECT *, employee.name AS employee_name FROM task");
        sql.push_str(&where_clause(filter));
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(employee) = &filter.employee {
            query = query.bind(("employee", employee.clone()));
        }
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }

        let tasks: Vec<TaskWithEmployee> = query.await?.take(0)?;
        Ok(tasks)
    }

    /// Find task by a "table:id" string
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Task>> {
        let thing: TaskId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid task id: {}", id)))?;
        let task: Option<Task> = self.base.db().select(thing).await?;
        Ok(task)
    }

    /// Create a task.
    ///
    /// The employee reference must resolve at write time; the check runs
    /// here, in the same repository operation as the write, and a missing
    /// employee fails the call before anything is persisted.
    pub async fn create(&self, data: TaskCreate) -> RepoResult<Task> {
        let employee = resolve_employee_id(&data.employee_id)?;
        self.check_employee_exists(&employee).await?;

        let status = data.status.unwrap_or(TaskStatus::Pending);
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE task SET
                    title = $title,
                    description = $description,
                    status = $status,
                    employee = $employee,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("title", data.title))
            .bind(("description", data.description.unwrap_or_default()))
            .bind(("status", status))
            .bind(("employee", employee))
            .bind(("created_at", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<Task> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create task".to_string()))
    }

    /// Partial update of a task.
    ///
    /// Unknown task id fails with `NotFound`; a supplied employee id that
    /// does not resolve fails with `InvalidReference` before the write.
    pub async fn update(&self, id: &str, data: TaskUpdate) -> RepoResult<Task> {
        let thing: TaskId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid task id: {}", id)))?;
        if self.base.db().select::<Option<Task>>(thing.clone()).await?.is_none() {
            return Err(RepoError::NotFound(format!("Task {} not found", id)));
        }

        let employee = match &data.employee_id {
            Some(raw) => {
                let employee = resolve_employee_id(raw)?;
                self.check_employee_exists(&employee).await?;
                Some(employee)
            }
            None => None,
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    title = IF $has_title THEN $title ELSE title END,
                    description = IF $has_description THEN $description ELSE description END,
                    status = IF $has_status THEN $status ELSE status END,
                    employee = IF $has_employee THEN $employee ELSE employee END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("has_title", data.title.is_some()))
            .bind(("title", data.title))
            .bind(("has_description", data.description.is_some()))
            .bind(("description", data.description))
            .bind(("has_status", data.status.is_some()))
            .bind(("status", data.status))
            .bind(("has_employee", employee.is_some()))
            .bind(("employee", employee))
            .await?;

        result
            .take::<Option<Task>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Task {} not found", id)))
    }

    /// Status counts over a scoped filter (single round-trip)
    pub async fn count_by_status(&self, filter: &TaskFilter) -> RepoResult<StatusCounts> {
        if filter.match_none {
            return Ok(StatusCounts::default());
        }

        let sql = format!(
            r#"
            LET $all = (SELECT status FROM task{});
            LET $completed = (SELECT * FROM $all WHERE status = 'completed');
            LET $in_progress = (SELECT * FROM $all WHERE status = 'in-progress');
            LET $pending = (SELECT * FROM $all WHERE status = 'pending');
            RETURN {{
                total: count($all),
                completed: count($completed),
                in_progress: count($in_progress),
                pending: count($pending)
            }}
            "#,
            where_clause(filter)
        );

        let mut query = self.base.db().query(sql);
        if let Some(employee) = &filter.employee {
            query = query.bind(("employee", employee.clone()));
        }
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }

        let mut result = query.await?;
        let counts: Option<StatusCounts> = result.take(4)?;
        Ok(counts.unwrap_or_default())
    }

    /// Per-employee task/completion breakdown, ordered by employee name
    pub async fn stats_per_employee(&self) -> RepoResult<Vec<EmployeeTaskRow>> {
        let rows: Vec<EmployeeTaskRow> = self
            .base
            .db()
            .query(
                r#"
                SELECT
                    <string>employee AS employee_id,
                    employee.name AS employee_name,
                    count() AS task_count,
                    count(status = 'completed') AS completed
                FROM task
                GROUP BY employee_id, employee_name
                ORDER BY employee_name
                "#,
            )
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Created/completed counts bucketed by calendar day since `since_millis`
    pub async fn recent_activity(&self, since_millis: i64) -> RepoResult<Vec<ActivityRow>> {
        let rows: Vec<ActivityRow> = self
            .base
            .db()
            .query(
                r#"
                SELECT
                    time::format(time::from::unix(created_at / 1000), '%Y-%m-%d') AS date,
                    count() AS tasks_created,
                    count(status = 'completed') AS tasks_completed
                FROM task
                WHERE created_at >= $since
                GROUP BY date
                ORDER BY date
                "#,
            )
            .bind(("since", since_millis))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// The referenced employee must exist before a task may point at it.
    /// Check and write are separate statements against the embedded store;
    /// single-document atomicity is all the storage layer guarantees.
    async fn check_employee_exists(&self, employee: &EmployeeId) -> RepoResult<()> {
        let found: Option<Employee> = self.base.db().select(employee.clone()).await?;
        if found.is_none() {
            return Err(RepoError::InvalidReference("Invalid employeeId".to_string()));
        }
        Ok(())
    }
}

/// WHERE clause for a scoped filter. Binds are supplied by the caller for
/// exactly the conditions present.
fn where_clause(filter: &TaskFilter) -> String {
    let mut clauses = Vec::new();
    if filter.employee.is_some() {
        clauses.push("employee = $employee");
    }
    if filter.status.is_some() {
        clauses.push("status = $status");
    }
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

/// Parse a caller-supplied employee id. Anything that does not parse can
/// never resolve, so it reports the same way as a missing employee.
fn resolve_employee_id(raw: &str) -> Result<EmployeeId, RepoError> {
    raw.parse::<RecordId>()
        .map_err(|_| RepoError::InvalidReference("Invalid employeeId".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_clause_matches_filter_shape() {
        let empty = TaskFilter::default();
        assert_eq!(where_clause(&empty), "");

        let by_employee = TaskFilter {
            employee: Some("employee:alice".parse().unwrap()),
            status: None,
            match_none: false,
        };
        assert_eq!(where_clause(&by_employee), " WHERE employee = $employee");

        let both = TaskFilter {
            employee: Some("employee:alice".parse().unwrap()),
            status: Some(TaskStatus::Pending),
            match_none: false,
        };
        assert_eq!(
            where_clause(&both),
            " WHERE employee = $employee AND status = $status"
        );
    }

    #[test]
    fn unparseable_employee_id_is_invalid_reference() {
        assert!(matches!(
            resolve_employee_id("not an id"),
            Err(RepoError::InvalidReference(_))
        ));
        assert!(resolve_employee_id("employee:alice").is_ok());
    }
}
