//! 内存存储
//!
//! 有序列表保存产品，插入顺序即列出顺序。所有修改都在同一把写锁内完成。

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    model::{produtos_exemplo, CandidateFields, NewProduct, Product},
    store::{ProductStore, StorageKind},
    validator::check_update,
};
use crate::core::error::CoreError;

#[derive(Default)]
pub struct LocalStore {
    produtos: RwLock<Vec<Product>>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置三条示例产品
    pub fn with_seed_data() -> Self {
        let produtos = produtos_exemplo()
            .into_iter()
            .map(|novo| novo.into_product(gerar_id()))
            .collect();
        Self {
            produtos: RwLock::new(produtos),
        }
    }

    /// 删除成功返回 true，ID 不存在返回 false
    pub async fn remove(&self, id: &str) -> bool {
        let mut produtos = self.produtos.write().await;
        match produtos.iter().position(|p| p.id == id) {
            Some(index) => {
                produtos.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.produtos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.produtos.read().await.is_empty()
    }
}

/// 使用系统随机源生成的 v4 UUID（不带连字符）
fn gerar_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl ProductStore for LocalStore {
    fn kind(&self) -> StorageKind {
        StorageKind::Local
    }

    async fn list(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.produtos.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Product, CoreError> {
        self.produtos
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CoreError::NotFound)
    }

    async fn create(&self, novo: NewProduct) -> Result<Product, CoreError> {
        let produto = novo.into_product(gerar_id());
        self.produtos.write().await.push(produto.clone());
        Ok(produto)
    }

    async fn update(&self, id: &str, fields: &CandidateFields) -> Result<Product, CoreError> {
        let mut produtos = self.produtos.write().await;
        let produto = produtos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::NotFound)?;

        let patch = check_update(produto, fields)?;
        patch.apply_to(produto);
        Ok(produto.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        if self.remove(id).await {
            Ok(())
        } else {
            Err(CoreError::NotFound)
        }
    }
}
