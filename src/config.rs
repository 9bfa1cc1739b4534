//! 服务配置
//!
//! 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量。
//! 配置在 `main` 中构建一次，之后按值传递，不使用全局实例。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infrastructure::airtable::DEFAULT_API_URL;

/// 未指定时依次尝试的配置文件
const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// Airtable 远程存储配置
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// 端口
    pub port: u16,
    /// 首页等静态文件目录
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)，`RUST_LOG` 优先
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_key: Option<String>,
    pub base_id: Option<String>,
    pub table_name: String,
    pub api_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_id: None,
            table_name: "Produtos".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// 远程存储凭据，两项都非空时才存在
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteCredentials<'a> {
    pub api_key: &'a str,
    pub base_id: &'a str,
}

impl RemoteConfig {
    pub fn credentials(&self) -> Option<RemoteCredentials<'_>> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let base_id = self.base_id.as_deref().filter(|b| !b.trim().is_empty())?;
        Some(RemoteCredentials { api_key, base_id })
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 完整加载流程：`PRODUTOS_CONFIG` 指定的文件或默认位置的文件，再叠加环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("PRODUTOS_CONFIG").ok().map(PathBuf::from);
        let path = explicit.or_else(|| {
            CONFIG_PATHS
                .iter()
                .map(|p| PathBuf::from(*p))
                .find(|p| p.exists())
        });

        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖配置，`lookup` 便于测试时注入
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("AIRTABLE_API_KEY") {
            self.remote.api_key = Some(key);
        }
        if let Some(base) = lookup("AIRTABLE_BASE_ID") {
            self.remote.base_id = Some(base);
        }
        if let Some(table) = lookup("AIRTABLE_TABLE_NAME") {
            self.remote.table_name = table;
        }
        if let Some(url) = lookup("AIRTABLE_API_URL") {
            self.remote.api_url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.http.bind_address = host;
        }
        if let Some(port) = lookup("PORT") {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("PORT 无效: {}", port)))?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.http.static_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.remote.table_name.trim().is_empty() {
            return Err(ConfigError::Validation("Airtable 表名不能为空".to_string()));
        }
        if reqwest::Url::parse(&self.remote.api_url).is_err() {
            return Err(ConfigError::Validation(format!(
                "无效的 Airtable API 地址: {}",
                self.remote.api_url
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}
