//! Employee Repository

use std::collections::HashMap;

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Employee, EmployeeCreate, EmployeeId, EmployeeResponse};
use crate::db::models::serde_helpers;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &EmployeeId) -> RepoResult<Option<Employee>> {
        let employee: Option<Employee> = self.base.db().select(id.clone()).await?;
        Ok(employee)
    }

    /// Whether an employee record exists
    pub async fn exists(&self, id: &EmployeeId) -> RepoResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query("CREATE employee SET name = $name RETURN AFTER")
            .bind(("name", data.name))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// All employees with their task counts, ordered by name
    pub async fn find_all_with_task_counts(&self) -> RepoResult<Vec<EmployeeResponse>> {
        #[derive(Deserialize)]
        struct CountRow {
            #[serde(with = "serde_helpers::record_id")]
            employee: EmployeeId,
            count: i64,
        }

        let counts: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT employee, count() AS count FROM task GROUP BY employee")
            .await?
            .take(0)?;
        let by_employee: HashMap<String, i64> = counts
            .into_iter()
            .map(|row| (row.employee.to_string(), row.count))
            .collect();

        let employees = self.find_all().await?;
        Ok(employees
            .into_iter()
            .map(|emp| {
                let id = emp.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
                let task_count = by_employee.get(&id).copied().unwrap_or(0);
                EmployeeResponse {
                    id,
                    name: emp.name,
                    task_count,
                }
            })
            .collect())
    }

    /// Total number of employees
    pub async fn count(&self) -> RepoResult<i64> {
        #[derive(Deserialize)]
        struct Row {
            count: i64,
        }

        let row: Option<Row> = self
            .base
            .db()
            .query("SELECT count() AS count FROM employee GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
