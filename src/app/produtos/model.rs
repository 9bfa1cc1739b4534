//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 允许的产品分类，顺序即错误提示中的顺序
pub const CATEGORIAS_PERMITIDAS: [&str; 3] = ["Fruta", "Legume", "Verdura"];

/// 未指定农户时使用的占位 ID
pub const AGRICULTOR_PADRAO: i64 = 99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub titulo: String,
    pub descricao: String,
    pub preco: f64,
    pub categoria: String,
    pub agricultor_id: i64,
}

/// 请求体中尚未校验的字段（创建、更新、校验接口共用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFields(Map<String, Value>);

impl CandidateFields {
    /// 只接受非空 JSON 对象，其余视为"未提供数据"
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) if !map.is_empty() => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }
}

/// 通过校验、待写入存储的新产品
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub titulo: String,
    pub descricao: String,
    pub preco: f64,
    pub categoria: String,
    pub agricultor_id: i64,
}

impl NewProduct {
    /// 调用方需先通过 `validate`
    pub fn from_candidate(fields: &CandidateFields) -> Self {
        Self {
            titulo: text_value(fields.get("titulo")),
            descricao: text_value(fields.get("descricao")),
            preco: fields.get("preco").and_then(number_value).unwrap_or(0.0),
            categoria: text_value(fields.get("categoria")),
            agricultor_id: agricultor_value(fields.get("agricultor_id")),
        }
    }

    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            titulo: self.titulo,
            descricao: self.descricao,
            preco: self.preco,
            categoria: self.categoria,
            agricultor_id: self.agricultor_id,
        }
    }
}

/// 部分更新：只有请求中出现的键才会被覆盖
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<f64>,
    pub categoria: Option<String>,
    pub agricultor_id: Option<i64>,
}

impl ProductPatch {
    pub fn from_candidate(fields: &CandidateFields) -> Self {
        Self {
            titulo: fields.get("titulo").map(|v| text_value(Some(v))),
            descricao: fields.get("descricao").map(|v| text_value(Some(v))),
            preco: fields.get("preco").and_then(number_value),
            categoria: fields.get("categoria").map(|v| text_value(Some(v))),
            agricultor_id: fields
                .get("agricultor_id")
                .map(|v| agricultor_value(Some(v))),
        }
    }

    pub fn apply_to(&self, produto: &mut Product) {
        if let Some(titulo) = &self.titulo {
            produto.titulo = titulo.clone();
        }
        if let Some(descricao) = &self.descricao {
            produto.descricao = descricao.clone();
        }
        if let Some(preco) = self.preco {
            produto.preco = preco;
        }
        if let Some(categoria) = &self.categoria {
            produto.categoria = categoria.clone();
        }
        if let Some(agricultor_id) = self.agricultor_id {
            produto.agricultor_id = agricultor_id;
        }
    }
}

impl Product {
    /// 用于更新前的校验：请求中的值优先，缺失的取当前值
    pub fn merged_with(&self, incoming: &CandidateFields) -> CandidateFields {
        let mut view = CandidateFields::default();
        for (key, atual) in [
            ("titulo", Value::from(self.titulo.clone())),
            ("preco", Value::from(self.preco)),
            ("categoria", Value::from(self.categoria.clone())),
        ] {
            let valor = incoming.get(key).cloned().unwrap_or(atual);
            view.set(key, valor);
        }
        view
    }
}

/// 内存存储启动时的示例数据
pub fn produtos_exemplo() -> Vec<NewProduct> {
    vec![
        NewProduct {
            titulo: "Maçã Fuji".to_string(),
            descricao: "Maçã fresca colhida na serra gaúcha".to_string(),
            preco: 8.5,
            categoria: "Fruta".to_string(),
            agricultor_id: 1,
        },
        NewProduct {
            titulo: "Cenoura Orgânica".to_string(),
            descricao: "Cenoura cultivada sem agrotóxicos".to_string(),
            preco: 4.2,
            categoria: "Legume".to_string(),
            agricultor_id: 2,
        },
        NewProduct {
            titulo: "Alface Crespa".to_string(),
            descricao: "Maço de alface crespa hidropônica".to_string(),
            preco: 3.0,
            categoria: "Verdura".to_string(),
            agricultor_id: AGRICULTOR_PADRAO,
        },
    ]
}

/// 缺失或 null 视为空串，非字符串按其 JSON 文本处理
pub(crate) fn text_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// 数字、数字字符串（去除首尾空白）和布尔值可以转换，非有限值不接受
pub(crate) fn number_value(value: &Value) -> Option<f64> {
    let numero = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    numero.filter(|n| n.is_finite())
}

pub(crate) fn agricultor_value(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .unwrap_or(AGRICULTOR_PADRAO),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(AGRICULTOR_PADRAO),
        _ => AGRICULTOR_PADRAO,
    }
}
