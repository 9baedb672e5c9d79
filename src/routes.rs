//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
};

use crate::{handlers, middleware::AppState};

/// 请求体上限（1 MiB，表单提交远小于此）
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查与指标）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_export));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        // 资产 CRUD
        .route(
            "/api/v1/assets",
            get(handlers::asset::list_assets).post(handlers::asset::create_asset),
        )
        .route("/api/v1/assets/stats", get(handlers::asset::asset_stats))
        .route("/api/v1/assets/ip-table", get(handlers::asset::ip_table))
        // 导出
        .route("/api/v1/assets/export/csv", get(handlers::export::export_csv))
        .route(
            "/api/v1/assets/export/webhook",
            post(handlers::export::export_webhook),
        )
        .route(
            "/api/v1/assets/{id}",
            get(handlers::asset::get_asset)
                .put(handlers::asset::update_asset)
                .delete(handlers::asset::delete_asset),
        )
        // 实时事件流（SSE）
        .route("/api/v1/stream/assets", get(handlers::stream::subscribe_asset_events))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .with_state(state)
}
