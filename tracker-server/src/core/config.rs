use crate::auth::{JwtConfig, JwtError};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATA_DIR | /var/lib/tracker | 数据目录 (嵌入式数据库) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | JWT_SECRET | (必填) | JWT 密钥，至少 32 字节 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌过期时间 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/data/tracker HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录，存储嵌入式数据库文件
    pub data_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// `JWT_SECRET` 缺失或过短时返回错误 — 进程启动失败，而不是在
    /// 每个请求上失败。
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/var/lib/tracker".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::from_env()?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        data_dir: impl Into<String>,
        http_port: u16,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            http_port,
            jwt: JwtConfig::with_secret(jwt_secret),
            environment: "development".into(),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
