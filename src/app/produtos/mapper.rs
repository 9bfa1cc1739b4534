//! 远程记录与产品之间的映射
//!
//! 远程表的列名大小写并不统一，每个字段按候选键顺序查找：
//! 首字母大写的列优先，其次是全小写的列，都没有时取零值。

use serde_json::{Map, Value};

use super::model::{
    agricultor_value, number_value, text_value, NewProduct, Product, ProductPatch,
};
use crate::infrastructure::airtable::RemoteRecord;

const TITULO: &[&str] = &["Titulo", "titulo"];
const DESCRICAO: &[&str] = &["Descricao", "descricao"];
const PRECO: &[&str] = &["Preco", "preco"];
const CATEGORIA: &[&str] = &["Categoria", "categoria"];
const AGRICULTOR_ID: &[&str] = &["Agricultor_id", "agricultor_id"];

fn campo<'a>(fields: &'a Map<String, Value>, chaves: &[&str]) -> Option<&'a Value> {
    chaves
        .iter()
        .find_map(|chave| fields.get(*chave).filter(|v| !v.is_null()))
}

pub fn to_product(record: &RemoteRecord) -> Product {
    let fields = &record.fields;
    Product {
        id: record.id.clone(),
        titulo: text_value(campo(fields, TITULO)),
        descricao: text_value(campo(fields, DESCRICAO)),
        preco: campo(fields, PRECO).and_then(number_value).unwrap_or(0.0),
        categoria: text_value(campo(fields, CATEGORIA)),
        agricultor_id: agricultor_value(campo(fields, AGRICULTOR_ID)),
    }
}

/// 写入时统一使用小写列名
pub fn to_remote_fields(novo: &NewProduct) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("titulo".into(), novo.titulo.clone().into());
    fields.insert("descricao".into(), novo.descricao.clone().into());
    fields.insert("preco".into(), novo.preco.into());
    fields.insert("categoria".into(), novo.categoria.clone().into());
    fields.insert("agricultor_id".into(), novo.agricultor_id.into());
    fields
}

pub fn patch_to_remote_fields(patch: &ProductPatch) -> Map<String, Value> {
    let mut fields = Map::new();
    if let Some(titulo) = &patch.titulo {
        fields.insert("titulo".into(), titulo.clone().into());
    }
    if let Some(descricao) = &patch.descricao {
        fields.insert("descricao".into(), descricao.clone().into());
    }
    if let Some(preco) = patch.preco {
        fields.insert("preco".into(), preco.into());
    }
    if let Some(categoria) = &patch.categoria {
        fields.insert("categoria".into(), categoria.clone().into());
    }
    if let Some(agricultor_id) = patch.agricultor_id {
        fields.insert("agricultor_id".into(), agricultor_id.into());
    }
    fields
}
