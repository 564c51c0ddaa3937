//! Tasks API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::db::models::{TaskCreate, TaskResponse, TaskUpdate};
use crate::db::repository::TaskRepository;
use crate::db::scope::{TaskFilter, TaskListQuery};
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;

/// GET /api/tasks?employeeId&status - role-scoped task listing
///
/// The filter is derived from the caller's identity: employees are pinned
/// to their own employee record no matter what they pass.
pub async fn list(
    State(state): State<ServerState>,
    ctx: AuthContext,
    Query(query): Query<TaskListQuery>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let filter = TaskFilter::scoped(&ctx, &query)?;
    let repo = TaskRepository::new(state.get_db());
    let tasks = repo.find_scoped(&filter).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /api/tasks - create a task (admin only)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TaskCreate>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    validate_payload(&payload)?;

    let repo = TaskRepository::new(state.get_db());
    let task = repo.create(payload).await?;

    tracing::info!(
        task_id = %task.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        employee = %task.employee,
        "Task created"
    );

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// PUT /api/tasks/{id} - partial update of a task (admin only)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TaskUpdate>,
) -> AppResult<Json<TaskResponse>> {
    validate_payload(&payload)?;

    let repo = TaskRepository::new(state.get_db());
    let task = repo.update(&id, payload).await?;

    tracing::info!(task_id = %id, "Task updated");

    Ok(Json(task.into()))
}
