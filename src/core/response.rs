//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// `/validar-produto` 以及所有 400 响应的结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valido: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensagem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erros: Option<Vec<String>>,
}

impl ValidationOutcome {
    pub fn valido(mensagem: impl Into<String>) -> Self {
        Self {
            valido: true,
            mensagem: Some(mensagem.into()),
            erros: None,
        }
    }

    pub fn invalido(erros: Vec<String>) -> Self {
        Self {
            valido: false,
            mensagem: None,
            erros: Some(erros),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundBody {
    pub mensagem: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub erro: String,
}

/// 当前存储模式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub remote_enabled: bool,
    pub storage: String,
}
