use anyhow::Context;
use produtos_api::{app, config::Config, infrastructure::logger::Logger, select_storage, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("加载配置失败")?;
    Logger::init(&config.logging.level)?;

    info!("启动农产品目录 REST API 服务器...");

    // 只在启动时选择一次存储后端
    let storage = select_storage(&config.remote).await;
    info!(
        remote_enabled = storage.remote_enabled(),
        storage = storage.kind().label(),
        "存储后端已选定"
    );

    let app = app::build_app(AppState::new(storage), &config.http.static_dir);

    let addr = format!("{}:{}", config.http.bind_address, config.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /                 - 首页");
    info!("   POST   /validar-produto  - 校验产品数据");
    info!("   GET    /produtos         - 列出产品");
    info!("   POST   /produtos         - 创建产品");
    info!("   GET    /produtos/:id     - 获取产品");
    info!("   PUT    /produtos/:id     - 更新产品 (PATCH 同)");
    info!("   DELETE /produtos/:id     - 删除产品");
    info!("   GET    /categorias       - 允许的分类");
    info!("   GET    /status           - 存储模式");

    axum::serve(listener, app).await.context("服务器运行失败")?;
    Ok(())
}
