//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`FieldError`] - 字段级验证错误
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Task not found"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::models::Role;
use crate::db::repository::RepoError;

/// One field-level validation failure, reported inside a 400 body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 应用错误枚举
///
/// # 错误分类
///
/// | 分类 | HTTP |
/// |------|------|
/// | 认证错误 | 401 |
/// | 权限错误 | 403 |
/// | 业务逻辑错误 | 400 / 404 / 409 |
/// | 系统错误 | 500 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Invalid or expired token")]
    /// 缺失/无效/过期令牌，或用户不存在/已停用
    Unauthorized,

    #[error("Invalid credentials")]
    /// 登录凭证错误
    InvalidCredentials,

    // ========== 权限错误 (403) ==========
    #[error("Access denied. Insufficient permissions")]
    /// 角色不在允许集合内
    Forbidden {
        required: &'static [Role],
        actual: Role,
    },

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Validation failed")]
    /// 验证失败 (400)，携带字段级错误列表
    Validation(Vec<FieldError>),

    #[error("{0}")]
    /// 外键引用无法解析 (400)
    InvalidReference(String),

    #[error("{0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("{0}")]
    /// 资源冲突 (409)
    Conflict(String),

    // ========== 系统错误 (500) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

/// JSON error body. Optional members are omitted entirely when unset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_role: Option<Role>,
}

impl ErrorBody {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            required_roles: None,
            user_role: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::message("Invalid or expired token"),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::message("Invalid credentials"),
            ),
            AppError::Forbidden { required, actual } => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    message: "Access denied. Insufficient permissions".to_string(),
                    errors: None,
                    required_roles: Some(required.to_vec()),
                    user_role: Some(actual),
                },
            ),
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Validation failed".to_string(),
                    errors: Some(fields),
                    required_roles: None,
                    user_role: None,
                },
            ),
            AppError::InvalidReference(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::message(msg)),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("An internal error occurred"),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("An internal error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        Self::InvalidReference(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Single-field validation error
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::InvalidReference(msg) => AppError::InvalidReference(msg),
            RepoError::Validation(msg) => AppError::validation_field("id", msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
