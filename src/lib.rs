//! # 农产品目录 REST API
//!
//! 管理农产品（produtos）的小型 REST 服务，支持两种可互换的存储：
//! - 内存列表（默认，启动时带三条示例数据）
//! - Airtable 表（配置凭据且连通性探测成功时启用）
//!
//! 分层结构：
//! - `app`：路由、处理器、校验、存储后端
//! - `core`：统一错误、响应结构、中间件
//! - `infrastructure`：日志、Airtable 客户端
//! - `config`：配置加载

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::produtos::handler::AppState;
pub use app::produtos::selector::{select_storage, Storage};
pub use config::Config;
