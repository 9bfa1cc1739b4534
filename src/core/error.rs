//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::response::{ErrorBody, NotFoundBody, ValidationOutcome};

pub const PRODUTO_NAO_ENCONTRADO: &str = "Produto não encontrado";

/// 核心错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    /// 字段校验失败，包含全部错误信息
    #[error("dados invalidos: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// 请求体缺失或无法解析
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", PRODUTO_NAO_ENCONTRADO)]
    NotFound,
    /// 远程存储失败，消息原样透传
    #[error("{0}")]
    BackendFailure(String),
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::Validation(erros) => {
                (StatusCode::BAD_REQUEST, Json(ValidationOutcome::invalido(erros))).into_response()
            }
            CoreError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationOutcome::invalido(vec![msg])),
            )
                .into_response(),
            CoreError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(NotFoundBody {
                    mensagem: PRODUTO_NAO_ENCONTRADO.to_string(),
                }),
            )
                .into_response(),
            CoreError::BackendFailure(erro) => {
                error!("远程存储失败: {}", erro);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { erro })).into_response()
            }
        }
    }
}
