//! Tracker Server - 员工任务跟踪后端
//!
//! # 架构概述
//!
//! 提供以下核心功能：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系，角色门控
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与按角色限定的查询过滤
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! tracker-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色门控、请求身份
//! ├── db/            # 数据库层 (模型、仓储、过滤)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、验证
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{AuthContext, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
