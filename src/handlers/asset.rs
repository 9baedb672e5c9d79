//! 资产管理的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::asset::*,
    pipeline::{self, AssetQuery, IpSortKey, SortDirection, SortKey},
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct AssetListQuery {
    #[serde(default)]
    pub search: String,
    /// "all" 或具体状态
    pub status: Option<String>,
    /// "all" 或具体类型
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    pub sort: Option<String>,
}

/// 把查询参数解析为过滤条件；"all" 与缺省等价
fn parse_query(query: AssetListQuery) -> Result<AssetQuery, AppError> {
    let status = match query.status.as_deref() {
        None | Some("all") | Some("") => None,
        Some(value) => Some(value.parse::<AssetStatus>().map_err(|e| AppError::BadRequest(e))?),
    };

    let asset_type = match query.asset_type.as_deref() {
        None | Some("all") | Some("") => None,
        Some(value) => Some(value.parse::<AssetType>().map_err(|e| AppError::BadRequest(e))?),
    };

    let sort = match query.sort.as_deref() {
        None | Some("") => SortKey::default(),
        Some(value) => value.parse::<SortKey>().map_err(|e| AppError::BadRequest(e))?,
    };

    Ok(AssetQuery { search: query.search, status, asset_type, sort })
}

/// 列出资产（搜索、过滤、排序后的视图）
pub async fn list_assets(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Query(query): Query<AssetListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let criteria = parse_query(query)?;

    let all = state.inventory.snapshot().await;
    let assets = criteria.apply(&all);

    Ok(Json(json!({
        "assets": assets,
        "count": assets.len(),
        "total": all.len()
    })))
}

/// 获取单个资产
pub async fn get_asset(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let asset = state
        .inventory
        .get(id)
        .await
        .ok_or_else(|| AppError::not_found("asset"))?;

    Ok(Json(asset))
}

/// 创建资产
pub async fn create_asset(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(draft): Json<AssetDraft>,
) -> Result<impl IntoResponse, AppError> {
    draft.validate()?;

    let asset = state.inventory.add(draft, auth_context.user_id).await?;

    Ok(Json(json!({
        "message": format!("{} has been added", asset.name),
        "asset": asset
    })))
}

/// 更新资产
pub async fn update_asset(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(draft): Json<AssetDraft>,
) -> Result<impl IntoResponse, AppError> {
    draft.validate()?;

    let asset = state.inventory.update(id, draft).await?;

    Ok(Json(json!({
        "message": format!("{} has been updated", asset.name),
        "asset": asset
    })))
}

/// 删除资产
pub async fn delete_asset(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.inventory.remove(id).await?;

    Ok(Json(json!({
        "message": "Asset has been deleted"
    })))
}

/// 统计卡片数据
pub async fn asset_stats(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.inventory.stats().await;
    Ok(Json(stats))
}

#[derive(Debug, Deserialize)]
pub struct IpTableQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// 已用 IP 地址子表，可独立排序
pub async fn ip_table(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Query(query): Query<IpTableQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sort = match query.sort.as_deref() {
        None | Some("") => IpSortKey::default(),
        Some(value) => value.parse::<IpSortKey>().map_err(|e| AppError::BadRequest(e))?,
    };
    let direction = match query.direction.as_deref() {
        None | Some("") => SortDirection::default(),
        Some(value) => value.parse::<SortDirection>().map_err(|e| AppError::BadRequest(e))?,
    };

    let all = state.inventory.snapshot().await;
    let rows = pipeline::ip_table(&all, sort, direction);

    Ok(Json(json!({
        "rows": rows,
        "count": rows.len()
    })))
}
