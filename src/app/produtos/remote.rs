//! Airtable 存储
//!
//! list/create 的失败作为服务器错误透传；get/update/delete 的任何失败都按"未找到"处理，
//! 因为在这一层无法区分记录不存在和临时故障。

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{
    mapper,
    model::{CandidateFields, NewProduct, Product},
    store::{ProductStore, StorageKind},
    validator::check_update,
};
use crate::{
    core::error::CoreError,
    infrastructure::airtable::{AirtableClient, RecordStoreError},
};

pub struct RemoteStore {
    client: AirtableClient,
}

impl RemoteStore {
    pub fn new(client: AirtableClient) -> Self {
        Self { client }
    }
}

fn backend_failure(err: RecordStoreError) -> CoreError {
    warn!("Airtable 调用失败: {}", err);
    CoreError::BackendFailure(err.to_string())
}

fn not_found(id: &str, err: RecordStoreError) -> CoreError {
    debug!(id, "Airtable 记录不可用: {}", err);
    CoreError::NotFound
}

#[async_trait]
impl ProductStore for RemoteStore {
    fn kind(&self) -> StorageKind {
        StorageKind::Remote
    }

    async fn list(&self) -> Result<Vec<Product>, CoreError> {
        let records = self.client.list_records().await.map_err(backend_failure)?;
        Ok(records.iter().map(mapper::to_product).collect())
    }

    async fn get(&self, id: &str) -> Result<Product, CoreError> {
        let record = self
            .client
            .get_record(id)
            .await
            .map_err(|e| not_found(id, e))?;
        Ok(mapper::to_product(&record))
    }

    async fn create(&self, novo: NewProduct) -> Result<Product, CoreError> {
        let fields = mapper::to_remote_fields(&novo);
        let record = self
            .client
            .create_record(&fields)
            .await
            .map_err(backend_failure)?;
        Ok(mapper::to_product(&record))
    }

    async fn update(&self, id: &str, fields: &CandidateFields) -> Result<Product, CoreError> {
        let atual = self.get(id).await?;
        let patch = check_update(&atual, fields)?;

        let record = self
            .client
            .update_record(id, &mapper::patch_to_remote_fields(&patch))
            .await
            .map_err(|e| not_found(id, e))?;
        Ok(mapper::to_product(&record))
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.client
            .delete_record(id)
            .await
            .map_err(|e| not_found(id, e))
    }
}
