//! Employees API Handlers

use axum::{Json, extract::State};
use http::StatusCode;

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeResponse};
use crate::db::repository::EmployeeRepository;
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;

/// GET /api/employees - all employees with their task counts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employees = repo.find_all_with_task_counts().await?;
    Ok(Json(employees))
}

/// POST /api/employees - create an employee record
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    validate_payload(&payload)?;

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.create(payload).await?;

    tracing::info!(
        employee_id = %employee.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        name = %employee.name,
        "Employee created"
    );

    Ok((StatusCode::CREATED, Json(employee)))
}
