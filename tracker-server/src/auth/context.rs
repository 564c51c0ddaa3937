//! Request Identity
//!
//! The request-scoped identity resolved by the authentication middleware.

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::core::ServerState;
use crate::db::models::{EmployeeId, Role, UserId};
use crate::utils::AppError;

/// 当前请求身份 (从已验证令牌解析出的活跃用户)
///
/// 由认证中间件创建并注入请求扩展，随请求结束丢弃。
///
/// # 示例
///
/// ```ignore
/// async fn handler(ctx: AuthContext) -> Json<()> {
///     if ctx.role == Role::Admin {
///         // 管理员分支
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// 用户 ID
    pub user_id: UserId,
    /// 用户角色
    pub role: Role,
    /// 关联的员工 ID (员工角色通常有，管理员通常没有)
    pub employee_id: Option<EmployeeId>,
}

/// Extractor for protected handlers.
///
/// Reads the context the middleware attached; a missing context means the
/// middleware did not run for this route, which is rejected defensively
/// rather than re-validating the header here.
impl FromRequestParts<ServerState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
