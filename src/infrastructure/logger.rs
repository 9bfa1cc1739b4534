//! 日志基础设施

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// `RUST_LOG` 优先，未设置时使用配置中的级别
    pub fn init(default_level: &str) -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .map_err(|e| anyhow!("日志系统初始化失败: {}", e))
    }
}
