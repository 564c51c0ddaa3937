//! Tasks API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::Role;

/// Tasks router
pub fn router() -> Router<ServerState> {
    // 读取路由：任何已认证用户 (员工只看到自己的任务)
    let read_routes = Router::new().route("/api/tasks", get(handler::list));

    // 管理路由：仅管理员可用
    let manage_routes = Router::new()
        .route("/api/tasks", post(handler::create))
        .route("/api/tasks/{id}", put(handler::update))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    read_routes.merge(manage_routes)
}
