//! 导出处理器：CSV 下载与 Webhook 推送

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{auth::middleware::AuthContext, error::AppError, export, middleware::AppState};

/// CSV 导出：始终覆盖全量列表，与当前过滤状态无关
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let assets = state.inventory.snapshot().await;
    let body = export::generate_csv(&assets);
    let filename = export::csv_filename(Utc::now().date_naive());

    tracing::info!(count = assets.len(), filename = %filename, "CSV export generated");
    metrics::counter!("inventory.exports", "kind" => "csv").increment(1);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, body))
}

#[derive(Debug, Deserialize)]
pub struct WebhookExportRequest {
    pub webhook_url: String,
}

/// Webhook 导出：POST 全量列表到调用方提供的地址，失败必须上报
pub async fn export_webhook(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Json(req): Json<WebhookExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.webhook_url.trim().is_empty() {
        return Err(AppError::validation("webhook_url is required"));
    }

    let assets = state.inventory.snapshot().await;
    state.exporter.send(req.webhook_url.trim(), &assets).await?;

    metrics::counter!("inventory.exports", "kind" => "webhook").increment(1);

    Ok(Json(json!({
        "message": "Export delivered",
        "count": assets.len()
    })))
}
