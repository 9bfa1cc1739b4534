//! 应用层：路由装配

pub mod produtos;

use std::path::Path;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use produtos::handler::{self, AppState};

/// 只包含 JSON 接口的路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/validar-produto", post(handler::validar_produto))
        .route(
            "/produtos",
            get(handler::listar_produtos).post(handler::criar_produto),
        )
        .route(
            "/produtos/:id",
            get(handler::obter_produto)
                .put(handler::atualizar_produto)
                .patch(handler::atualizar_produto)
                .delete(handler::remover_produto),
        )
        .route("/categorias", get(handler::listar_categorias))
        .route("/status", get(handler::status))
        .with_state(state)
}

/// 完整应用：接口 + 首页静态文件 + CORS 与日志中间件
pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    router(state)
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
}
