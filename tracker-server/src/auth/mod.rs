//! 认证模块 - JWT 令牌、认证中间件和角色门控
//!
//! # 模块结构
//!
//! - [`jwt`] - JWT 令牌服务 (签发/验证)
//! - [`middleware`] - 认证中间件和角色门控
//! - [`context`] - 请求身份 ([`AuthContext`])

pub mod context;
pub mod jwt;
pub mod middleware;

pub use context::AuthContext;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
