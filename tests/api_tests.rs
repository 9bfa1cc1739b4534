use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use produtos_api::{
    app::{self, produtos::local::LocalStore},
    AppState, Storage,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

fn local_app() -> Router {
    app::router(AppState::new(Storage::local(LocalStore::with_seed_data())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn produto_valido() -> Value {
    json!({
        "titulo": "Pimentão Amarelo",
        "descricao": "Bandeja com 3 unidades",
        "preco": 11.9,
        "categoria": "Legume"
    })
}

#[tokio::test]
async fn status_reports_local_storage() {
    let app = local_app();
    for _ in 0..3 {
        let (status, body) = send(&app, Method::GET, "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"remote_enabled": false, "storage": "Local (memoria)"}));
    }
}

#[tokio::test]
async fn lists_seeded_products() {
    let app = local_app();
    let (status, body) = send(&app, Method::GET, "/produtos", None).await;
    assert_eq!(status, StatusCode::OK);

    let produtos = body.as_array().unwrap();
    assert_eq!(produtos.len(), 3);
    assert_eq!(produtos[0]["categoria"], "Fruta");
    assert_eq!(produtos[2]["categoria"], "Verdura");
}

#[tokio::test]
async fn lists_categories_in_order() {
    let (status, body) = send(&local_app(), Method::GET, "/categorias", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Fruta", "Legume", "Verdura"]));
}

#[tokio::test]
async fn validate_endpoint() {
    let app = local_app();

    let (status, body) = send(&app, Method::POST, "/validar-produto", Some(produto_valido())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"valido": true, "mensagem": "Produto validado com sucesso!"}));

    let (status, body) = send(
        &app,
        Method::POST,
        "/validar-produto",
        Some(json!({"titulo": "Uva", "preco": 0, "categoria": "Fruta"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valido"], false);
    assert_eq!(
        body["erros"],
        json!([
            "O preco deve ser maior que zero.",
            "O titulo do produto deve ter no minimo 5 caracteres."
        ])
    );
}

#[tokio::test]
async fn missing_body_is_rejected() {
    let app = local_app();

    let (status, body) = send(&app, Method::POST, "/validar-produto", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"valido": false, "erros": ["Dados do produto nao fornecidos."]}));

    let (status, body) = send(&app, Method::POST, "/produtos", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erros"], json!(["Dados do produto nao fornecidos."]));
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let app = local_app();

    let (status, criado) = send(&app, Method::POST, "/produtos", Some(produto_valido())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criado["titulo"], "Pimentão Amarelo");
    assert_eq!(criado["preco"], 11.9);
    assert_eq!(criado["agricultor_id"], 99);

    let id = criado["id"].as_str().unwrap();
    let (status, obtido) = send(&app, Method::GET, &format!("/produtos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(obtido, criado);

    let (_, lista) = send(&app, Method::GET, "/produtos", None).await;
    assert_eq!(lista.as_array().unwrap().len(), 4);
    assert_eq!(lista[3]["id"], id);
}

#[tokio::test]
async fn create_accepts_price_as_string() {
    let (status, criado) = send(
        &local_app(),
        Method::POST,
        "/produtos",
        Some(json!({"titulo": "Rúcula Fresca", "preco": "2.50", "categoria": "Verdura", "agricultor_id": 12})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criado["preco"], 2.5);
    assert_eq!(criado["descricao"], "");
    assert_eq!(criado["agricultor_id"], 12);
}

#[tokio::test]
async fn create_collects_all_errors() {
    let app = local_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/produtos",
        Some(json!({"titulo": "  abcd  ", "preco": "caro", "categoria": "fruta"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["erros"],
        json!([
            "O preco deve ser um valor numerico valido.",
            "O titulo do produto deve ter no minimo 5 caracteres.",
            "A categoria 'fruta' nao e permitida. Use: Fruta, Legume, Verdura."
        ])
    );

    let (_, lista) = send(&app, Method::GET, "/produtos", None).await;
    assert_eq!(lista.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_product_is_404() {
    let (status, body) = send(&local_app(), Method::GET, "/produtos/nao-existe", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"mensagem": "Produto não encontrado"}));
}

#[tokio::test]
async fn partial_update_with_patch_and_put() {
    let app = local_app();
    let (_, criado) = send(&app, Method::POST, "/produtos", Some(produto_valido())).await;
    let uri = format!("/produtos/{}", criado["id"].as_str().unwrap());

    let (status, atualizado) = send(&app, Method::PATCH, &uri, Some(json!({"preco": 9.99}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(atualizado["preco"], 9.99);
    assert_eq!(atualizado["titulo"], criado["titulo"]);
    assert_eq!(atualizado["descricao"], criado["descricao"]);
    assert_eq!(atualizado["categoria"], criado["categoria"]);

    let (status, atualizado) =
        send(&app, Method::PUT, &uri, Some(json!({"categoria": "Verdura", "id": "outro"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(atualizado["categoria"], "Verdura");
    assert_eq!(atualizado["id"], criado["id"]);
    assert_eq!(atualizado["preco"], 9.99);
}

#[tokio::test]
async fn invalid_update_is_rejected() {
    let app = local_app();
    let (_, lista) = send(&app, Method::GET, "/produtos", None).await;
    let uri = format!("/produtos/{}", lista[0]["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"preco": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erros"], json!(["O preco deve ser maior que zero."]));

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erros"], json!(["Dados de atualizacao nao fornecidos."]));

    let (status, _) = send(&app, Method::PUT, "/produtos/nao-existe", Some(json!({"preco": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_permanent() {
    let app = local_app();
    let (_, lista) = send(&app, Method::GET, "/produtos", None).await;
    let uri = format!("/produtos/{}", lista[1]["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn landing_page_is_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Catálogo</h1>").unwrap();

    let app = app::build_app(
        AppState::new(Storage::local(LocalStore::with_seed_data())),
        dir.path(),
    );

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(String::from_utf8_lossy(&bytes), "<h1>Catálogo</h1>");
}
