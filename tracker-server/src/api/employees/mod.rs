//! Employees API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::Role;

/// Employees router - admin only
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/employees",
            get(handler::list).post(handler::create),
        )
        .layer(middleware::from_fn(require_role(&[Role::Admin])))
}
