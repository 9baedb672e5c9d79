//! 资产清单系统主入口

use asset_inventory::{
    auth::JwtService, config::AppConfig, db, export::WebhookExporter, handlers::health,
    middleware::AppState, realtime::EventBus, routes, services::InventoryService, telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("asset-inventory {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 生产环境应该直接设置环境变量，不依赖 .env 文件
    if let Ok(profile) = std::env::var("INVENTORY_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    // 设置应用启动时间
    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志与指标
    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Asset inventory starting...");

    // 3. 数据库连接池 + 迁移
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. 构建应用状态
    let event_bus = Arc::new(EventBus::new(1000));
    let inventory = Arc::new(InventoryService::new(db_pool.clone(), event_bus.clone()));
    let exporter = Arc::new(WebhookExporter::new(
        config.export.origin.clone(),
        config.export.webhook_timeout_secs,
    )?);
    let jwt_service = Arc::new(JwtService::from_config(&config)?);

    // 初始加载失败不阻止启动：旧列表不可用时 /ready 保持未就绪，
    // 变更通知或下一次成功加载会补上
    if let Err(e) = inventory.reload().await {
        tracing::error!(error = %e, "Initial asset load failed");
    }

    // 5. 订阅变更通知（句柄负责在关停时释放订阅）
    let change_feed = inventory.spawn_change_feed();

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool.clone(),
        inventory,
        exporter,
        jwt_service,
        event_bus,
    });

    // 6. 构建路由并启动服务器
    let app = routes::create_router(app_state);

    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    change_feed.shutdown();
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

/// 打印帮助信息
fn print_help() {
    println!("asset-inventory {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: asset-inventory [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 INVENTORY_ 前缀的环境变量完成");
}
