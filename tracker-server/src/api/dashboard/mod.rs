//! Dashboard API Module

mod handler;

pub use handler::{ActivityPoint, DashboardResponse, EmployeeTaskStats};

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Dashboard router - any authenticated role
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(handler::get_dashboard))
}
