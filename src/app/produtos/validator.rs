//! 产品字段校验
//!
//! 所有规则独立执行，错误全部收集后一起返回，不会在第一条失败时中断。

use super::model::{
    number_value, text_value, CandidateFields, Product, ProductPatch, CATEGORIAS_PERMITIDAS,
};
use crate::core::error::CoreError;

pub const PRECO_INVALIDO: &str = "O preco deve ser um valor numerico valido.";
pub const PRECO_NAO_POSITIVO: &str = "O preco deve ser maior que zero.";
pub const TITULO_CURTO: &str = "O titulo do produto deve ter no minimo 5 caracteres.";

const TITULO_MIN_CHARS: usize = 5;

/// 返回错误信息列表，空列表表示校验通过
pub fn validate(fields: &CandidateFields) -> Vec<String> {
    let mut erros = Vec::new();

    // 缺失的价格按 0 处理
    match fields.get("preco") {
        None => erros.push(PRECO_NAO_POSITIVO.to_string()),
        Some(valor) => match number_value(valor) {
            Some(preco) if preco > 0.0 => {}
            Some(_) => erros.push(PRECO_NAO_POSITIVO.to_string()),
            None => erros.push(PRECO_INVALIDO.to_string()),
        },
    }

    let titulo = text_value(fields.get("titulo"));
    if titulo.trim().chars().count() < TITULO_MIN_CHARS {
        erros.push(TITULO_CURTO.to_string());
    }

    let categoria = fields.get("categoria");
    let permitida = categoria
        .and_then(|v| v.as_str())
        .is_some_and(|c| CATEGORIAS_PERMITIDAS.contains(&c));
    if !permitida {
        erros.push(format!(
            "A categoria '{}' nao e permitida. Use: {}.",
            text_value(categoria),
            CATEGORIAS_PERMITIDAS.join(", ")
        ));
    }

    erros
}

/// 更新前的检查：用"当前值 + 请求值"的合并视图校验，通过后只返回请求中出现的字段
pub fn check_update(atual: &Product, incoming: &CandidateFields) -> Result<ProductPatch, CoreError> {
    let erros = validate(&atual.merged_with(incoming));
    if !erros.is_empty() {
        return Err(CoreError::Validation(erros));
    }
    Ok(ProductPatch::from_candidate(incoming))
}
