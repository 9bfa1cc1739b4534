//! 产品接口处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use tracing::debug;

use super::{
    model::{CandidateFields, NewProduct, Product, CATEGORIAS_PERMITIDAS},
    selector::Storage,
    validator::validate,
};
use crate::core::{
    error::CoreError,
    response::{StatusResponse, ValidationOutcome},
};

const DADOS_PRODUTO_AUSENTES: &str = "Dados do produto nao fornecidos.";
const DADOS_ATUALIZACAO_AUSENTES: &str = "Dados de atualizacao nao fornecidos.";
const PRODUTO_VALIDADO: &str = "Produto validado com sucesso!";

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

/// 请求体缺失、无法解析、不是对象或为空对象时返回 400
fn candidate_from_body(
    body: Result<Json<Value>, JsonRejection>,
    ausente: &str,
) -> Result<CandidateFields, CoreError> {
    let value = match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!("请求体无法解析: {}", rejection);
            Value::Null
        }
    };
    CandidateFields::from_json(value).ok_or_else(|| CoreError::BadRequest(ausente.to_string()))
}

fn ensure_valid(fields: &CandidateFields) -> Result<(), CoreError> {
    let erros = validate(fields);
    if erros.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(erros))
    }
}

pub async fn validar_produto(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ValidationOutcome>, CoreError> {
    let fields = candidate_from_body(body, DADOS_PRODUTO_AUSENTES)?;
    ensure_valid(&fields)?;
    Ok(Json(ValidationOutcome::valido(PRODUTO_VALIDADO)))
}

pub async fn listar_produtos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let produtos = state.storage.store().list().await?;
    Ok(Json(produtos))
}

pub async fn criar_produto(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let fields = candidate_from_body(body, DADOS_PRODUTO_AUSENTES)?;
    ensure_valid(&fields)?;

    let produto = state
        .storage
        .store()
        .create(NewProduct::from_candidate(&fields))
        .await?;
    Ok((StatusCode::CREATED, Json(produto)))
}

pub async fn obter_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let produto = state.storage.store().get(&id).await?;
    Ok(Json(produto))
}

/// PUT 与 PATCH 共用：部分字段更新
pub async fn atualizar_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let fields = candidate_from_body(body, DADOS_ATUALIZACAO_AUSENTES)?;
    let produto = state.storage.store().update(&id, &fields).await?;
    Ok(Json(produto))
}

pub async fn remover_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.storage.store().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn listar_categorias() -> Json<[&'static str; 3]> {
    Json(CATEGORIAS_PERMITIDAS)
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        remote_enabled: state.storage.remote_enabled(),
        storage: state.storage.kind().label().to_string(),
    })
}
