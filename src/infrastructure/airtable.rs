//! Airtable 记录存储客户端
//!
//! 只覆盖产品目录需要的五个操作：分页列出、按 ID 读取、创建、部分更新、删除。
//! 记录形如 `{"id": "...", "fields": {...}}`，字段内容由上层映射。

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// 远程存储返回的通用记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<RemoteRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeletedRecord {
    #[serde(default)]
    deleted: bool,
}

#[derive(Serialize)]
struct FieldsBody<'a> {
    fields: &'a Map<String, Value>,
}

/// 与远程存储交互时可能出现的错误
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("URL invalida para o Airtable: {0}")]
    InvalidUrl(String),

    #[error("Falha na requisicao ao Airtable: {0}")]
    RequestFailed(String),

    #[error("Resposta invalida do Airtable: {0}")]
    ResponseParseFailed(String),

    #[error("Registro nao encontrado no Airtable: {0}")]
    NotFound(String),

    #[error("Erro da API do Airtable (status {status}): {message}")]
    ApiError { status: u16, message: String },
}

/// 绑定到单张表的客户端
#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    api_key: String,
    table_url: Url,
}

impl AirtableClient {
    /// 表地址为 `{api_url}/{base_id}/{table_name}`，各段会做路径编码
    pub fn new(
        api_url: &str,
        api_key: impl Into<String>,
        base_id: &str,
        table_name: &str,
    ) -> Result<Self, RecordStoreError> {
        let mut table_url =
            Url::parse(api_url).map_err(|e| RecordStoreError::InvalidUrl(e.to_string()))?;
        table_url
            .path_segments_mut()
            .map_err(|_| RecordStoreError::InvalidUrl(api_url.to_string()))?
            .pop_if_empty()
            .push(base_id)
            .push(table_name);

        Ok(Self {
            client: Client::new(),
            api_key: api_key.into(),
            table_url,
        })
    }

    fn record_url(&self, record_id: &str) -> Url {
        let mut url = self.table_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(record_id);
        }
        url
    }

    /// 按 `offset` 游标翻页，直到取完整张表
    pub async fn list_records(&self) -> Result<Vec<RemoteRecord>, RecordStoreError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.client.get(self.table_url.clone());
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor)]);
            }

            let page: RecordPage = self.send(request).await?;
            debug!(count = page.records.len(), "收到一页 Airtable 记录");
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    pub async fn get_record(&self, record_id: &str) -> Result<RemoteRecord, RecordStoreError> {
        self.send(self.client.get(self.record_url(record_id))).await
    }

    pub async fn create_record(
        &self,
        fields: &Map<String, Value>,
    ) -> Result<RemoteRecord, RecordStoreError> {
        let request = self
            .client
            .post(self.table_url.clone())
            .json(&FieldsBody { fields });
        self.send(request).await
    }

    /// PATCH 语义：只修改传入的字段
    pub async fn update_record(
        &self,
        record_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<RemoteRecord, RecordStoreError> {
        let request = self
            .client
            .patch(self.record_url(record_id))
            .json(&FieldsBody { fields });
        self.send(request).await
    }

    pub async fn delete_record(&self, record_id: &str) -> Result<(), RecordStoreError> {
        let deleted: DeletedRecord = self
            .send(self.client.delete(self.record_url(record_id)))
            .await?;
        if deleted.deleted {
            Ok(())
        } else {
            Err(RecordStoreError::NotFound(record_id.to_string()))
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RecordStoreError> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| RecordStoreError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| RecordStoreError::ResponseParseFailed(e.to_string())),
            StatusCode::NOT_FOUND => {
                let body = response.text().await.unwrap_or_default();
                Err(RecordStoreError::NotFound(body))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(RecordStoreError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}
