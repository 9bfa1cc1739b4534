//! 启动时选择存储后端
//!
//! 配置了 Airtable 凭据时先创建远程存储并做一次连通性探测（列出记录），
//! 成功则整个进程使用远程存储；探测失败或未配置凭据时永久回退到内存存储。

use std::sync::Arc;

use tracing::{info, warn};

use super::{
    local::LocalStore,
    remote::RemoteStore,
    store::{ProductStore, StorageKind},
};
use crate::{config::RemoteConfig, infrastructure::airtable::AirtableClient};

/// 选定后不再改变的存储句柄
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn ProductStore>,
}

impl Storage {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn local(store: LocalStore) -> Self {
        Self::new(Arc::new(store))
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }

    pub fn kind(&self) -> StorageKind {
        self.store.kind()
    }

    pub fn remote_enabled(&self) -> bool {
        self.kind() == StorageKind::Remote
    }
}

pub async fn select_storage(config: &RemoteConfig) -> Storage {
    let Some(credenciais) = config.credentials() else {
        info!("未配置 AIRTABLE_API_KEY / AIRTABLE_BASE_ID，使用内存存储");
        return Storage::local(LocalStore::with_seed_data());
    };

    let client = match AirtableClient::new(
        &config.api_url,
        credenciais.api_key,
        credenciais.base_id,
        &config.table_name,
    ) {
        Ok(client) => client,
        Err(e) => {
            warn!("无法创建 Airtable 客户端，回退到内存存储: {}", e);
            return Storage::local(LocalStore::with_seed_data());
        }
    };

    let remote = RemoteStore::new(client);
    match remote.list().await {
        Ok(produtos) => {
            info!(
                table = %config.table_name,
                count = produtos.len(),
                "Airtable 连接成功，使用远程存储"
            );
            Storage::new(Arc::new(remote))
        }
        Err(e) => {
            warn!("Airtable 连通性探测失败，回退到内存存储: {}", e);
            Storage::local(LocalStore::with_seed_data())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_without_credentials_uses_local() {
        let storage = select_storage(&RemoteConfig::default()).await;
        assert!(!storage.remote_enabled());
        assert_eq!(storage.kind(), StorageKind::Local);
        assert_eq!(storage.store().list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_api_url_falls_back() {
        let config = RemoteConfig {
            api_key: Some("pat".to_string()),
            base_id: Some("app".to_string()),
            api_url: "::invalida::".to_string(),
            ..RemoteConfig::default()
        };
        let storage = select_storage(&config).await;
        assert_eq!(storage.kind(), StorageKind::Local);
    }
}
