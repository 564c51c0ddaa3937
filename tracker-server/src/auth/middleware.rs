//! 认证中间件
//!
//! 为 JWT 认证和角色授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthContext, JwtService};
use crate::core::ServerState;
use crate::db::models::Role;
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;
use crate::utils::AppError;

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT，然后按令牌中的
/// 用户 ID 从用户存储加载活跃用户。成功后将 [`AuthContext`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/`, `/health`)
/// - `/api/auth/login`, `/api/auth/register`
///
/// # 错误处理
///
/// 缺失令牌、格式错误、验证失败、用户不存在、用户已停用都返回同一个
/// 401 响应 — 调用方无法区分无效令牌和已停用账户。
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    let is_public_api_route = path == "/api/auth/login" || path == "/api/auth/register";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => match JwtService::extract_from_header(header) {
            Some(token) => token,
            None => {
                security_log!("WARN", "auth_malformed", uri = format!("{:?}", req.uri()));
                return Err(AppError::Unauthorized);
            }
        },
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::Unauthorized);
        }
    };

    // 验证令牌
    let user_id = match state.jwt.verify(token) {
        Ok(sub) => sub,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            return Err(AppError::Unauthorized);
        }
    };

    // 解析为活跃用户。不存在、已停用和主体格式错误与无效令牌不可区分，
    // 防止探测账户状态。
    let repo = UserRepository::new(state.get_db());
    let user = match repo.find_by_id_str(&user_id).await {
        Ok(Some(user)) if user.is_active => user,
        Ok(_) | Err(RepoError::Validation(_)) => {
            security_log!("WARN", "auth_unknown_user", user_id = user_id.clone());
            return Err(AppError::Unauthorized);
        }
        Err(e) => return Err(AppError::from(e)),
    };

    let Some(id) = user.id.clone() else {
        return Err(AppError::internal("user record missing id"));
    };

    let ctx = AuthContext {
        user_id: id,
        role: user.role,
        employee_id: user.employee.clone(),
    };
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// 角色门控中间件 - 要求特定角色集合
///
/// # 参数
///
/// - `allowed`: 允许的角色集合，如 `&[Role::Admin]`
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/employees", get(handler::list))
///     .layer(middleware::from_fn(require_role(&[Role::Admin])));
/// ```
///
/// # 错误
///
/// 无身份返回 401，角色不匹配返回 403 (响应携带允许集合和实际角色)
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let ctx = req
                .extensions()
                .get::<AuthContext>()
                .ok_or(AppError::Unauthorized)?;

            if let Err(e) = check_role(ctx.role, allowed) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = ctx.user_id.to_string(),
                    user_role = ctx.role.as_str(),
                    required_roles = format!("{:?}", allowed)
                );
                return Err(e);
            }

            Ok(next.run(req).await)
        })
    }
}

/// Pure role check: order-independent, no side effects.
fn check_role(actual: Role, allowed: &'static [Role]) -> Result<(), AppError> {
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(AppError::Forbidden {
            required: allowed,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_in_set_passes() {
        assert!(check_role(Role::Admin, &[Role::Admin]).is_ok());
        assert!(check_role(Role::Employee, &[Role::Admin, Role::Employee]).is_ok());
    }

    #[test]
    fn role_outside_set_is_forbidden() {
        let err = check_role(Role::Employee, &[Role::Admin]).unwrap_err();
        match err {
            AppError::Forbidden { required, actual } => {
                assert_eq!(required, [Role::Admin].as_slice());
                assert_eq!(actual, Role::Employee);
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
