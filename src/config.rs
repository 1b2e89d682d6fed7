//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// `.env.example` 中的示例密钥，不允许用于运行
const PLACEHOLDER_JWT_SECRET: &str = "change-this-secret-in-production-min-32-chars!";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:4000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    pub url: Secret<String>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥（进程级，启动时注入，运行期不轮换）
    pub jwt_secret: Secret<String>,
    /// 令牌有效期（秒）
    pub token_ttl_secs: u64,
    /// 密码最小长度
    pub password_min_length: usize,
    /// 密码必须包含大写字母
    pub password_require_uppercase: bool,
    /// 密码必须包含数字
    pub password_require_digit: bool,
    /// 密码必须包含特殊字符
    pub password_require_special: bool,
    /// Argon2 内存开销（KiB）
    pub hash_memory_kib: u32,
    /// Argon2 迭代次数
    pub hash_iterations: u32,
    /// Argon2 并行度
    pub hash_parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 静态文件根目录，上传文件位于其下的 upload/ 子目录
    pub public_dir: String,
    /// 单次上传请求体上限（字节）
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:4000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.token_ttl_secs", 7200)?
            .set_default("security.password_min_length", 6)?
            .set_default("security.password_require_uppercase", false)?
            .set_default("security.password_require_digit", false)?
            .set_default("security.password_require_special", false)?
            .set_default("security.hash_memory_kib", 19456)?
            .set_default("security.hash_iterations", 2)?
            .set_default("security.hash_parallelism", 1)?
            .set_default("storage.public_dir", "public")?
            .set_default("storage.max_upload_bytes", 10 * 1024 * 1024)?;

        // 从环境变量加载配置（前缀为 BLOG_）
        settings = settings.add_source(
            Environment::with_prefix("BLOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证端口范围
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port != 0 && port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证数据库连接池配置
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        // 验证 JWT 密钥长度（至少 32 字符）
        let jwt_secret = self.security.jwt_secret.expose_secret();
        if jwt_secret.len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }
        if jwt_secret == PLACEHOLDER_JWT_SECRET {
            return Err(ConfigError::Message(
                "JWT secret is the .env.example placeholder; set BLOG_SECURITY__JWT_SECRET".to_string(),
            ));
        }

        // 验证令牌有效期
        if self.security.token_ttl_secs < 60 || self.security.token_ttl_secs > 86400 {
            return Err(ConfigError::Message(
                "token_ttl_secs must be between 60 and 86400 (1 minute to 24 hours)".to_string(),
            ));
        }

        // 验证密码策略
        if self.security.password_min_length < 6 || self.security.password_min_length > 128 {
            return Err(ConfigError::Message(
                "password_min_length must be between 6 and 128".to_string(),
            ));
        }

        // 验证哈希开销
        if self.security.hash_memory_kib == 0
            || self.security.hash_iterations == 0
            || self.security.hash_parallelism == 0
        {
            return Err(ConfigError::Message(
                "hash_memory_kib, hash_iterations and hash_parallelism must be > 0".to_string(),
            ));
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ConfigError::Message("max_upload_bytes must be > 0".to_string()));
        }

        Ok(())
    }
}
