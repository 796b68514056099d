//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 出版社通知邮件配置
    #[serde(default)]
    pub mail: MailConfig,

    /// 提示消息配置
    #[serde(default)]
    pub flash: FlashConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/bookr.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 邮件通知配置
///
/// 未设置 webhook_url 时只记录日志，不发送请求
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// 邮件服务 Webhook 地址
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// 发件人地址
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 首次重试前的等待时间（毫秒），之后每次翻倍
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

fn default_from_address() -> String {
    "noreply@bookr.local".to_string()
}

fn default_mail_timeout() -> u64 {
    10
}

fn default_retry_backoff() -> u64 {
    500
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            from_address: default_from_address(),
            timeout_secs: default_mail_timeout(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

/// 提示消息（flash）配置
#[derive(Debug, Clone, Deserialize)]
pub struct FlashConfig {
    /// 未读取消息的保留时间（秒）
    #[serde(default = "default_flash_ttl")]
    pub ttl_secs: u64,

    /// 最多保留的会话 key 数量
    #[serde(default = "default_flash_max_keys")]
    pub max_keys: usize,
}

fn default_flash_ttl() -> u64 {
    3600
}

fn default_flash_max_keys() -> usize {
    10_000
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_flash_ttl(),
            max_keys: default_flash_max_keys(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
