//! 产品存储抽象
//!
//! 处理器只依赖 `ProductStore`，具体实现（内存或 Airtable）在启动时选定。

use async_trait::async_trait;

use super::model::{CandidateFields, NewProduct, Product};
use crate::core::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Remote,
    Local,
}

impl StorageKind {
    pub fn label(self) -> &'static str {
        match self {
            StorageKind::Remote => "Remote",
            StorageKind::Local => "Local (memoria)",
        }
    }
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    fn kind(&self) -> StorageKind;

    async fn list(&self) -> Result<Vec<Product>, CoreError>;

    async fn get(&self, id: &str) -> Result<Product, CoreError>;

    async fn create(&self, novo: NewProduct) -> Result<Product, CoreError>;

    /// 用合并后的视图重新校验，只写入请求中出现的字段
    async fn update(&self, id: &str, fields: &CandidateFields) -> Result<Product, CoreError>;

    async fn delete(&self, id: &str) -> Result<(), CoreError>;
}
