//! Asset repository (资产数据访问)
//!
//! Every write goes through `RETURNING *` so callers always receive the
//! canonical row as the store persisted it, including server-assigned id and
//! audit timestamps. The client's copy of a record is never trusted back.

use crate::{error::AppError, models::asset::*};
use sqlx::PgPool;
use uuid::Uuid;

pub struct AssetRepository {
    db: PgPool,
}

impl AssetRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 按创建时间倒序列出全部资产
    pub async fn list_all(&self) -> Result<Vec<AssetRow>, AppError> {
        let rows = sqlx::query_as::<_, AssetRow>(
            "SELECT * FROM assets ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// 获取单个资产
    pub async fn get(&self, id: Uuid) -> Result<Option<AssetRow>, AppError> {
        let row = sqlx::query_as::<_, AssetRow>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// 创建资产，返回库中的规范记录
    pub async fn create(
        &self,
        patch: &AssetPatch,
        created_by: Option<Uuid>,
    ) -> Result<AssetRow, AppError> {
        let row = sqlx::query_as::<_, AssetRow>(
            r#"
            INSERT INTO assets (
                name, asset_type, status, serial_number, manufacturer, model,
                purchase_date, warranty_expiry, location, assigned_to,
                ip_address, anydesk_id, division, cpu, ram, storage, storage2,
                storage3, graphics, operating_system, network, notes, created_by
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23
            )
            RETURNING *
            "#,
        )
        .bind(&patch.name)
        .bind(patch.asset_type)
        .bind(patch.status)
        .bind(&patch.serial_number)
        .bind(&patch.manufacturer)
        .bind(&patch.model)
        .bind(patch.purchase_date)
        .bind(patch.warranty_expiry)
        .bind(&patch.location)
        .bind(&patch.assigned_to)
        .bind(&patch.ip_address)
        .bind(&patch.anydesk_id)
        .bind(&patch.division)
        .bind(&patch.cpu)
        .bind(&patch.ram)
        .bind(&patch.storage)
        .bind(&patch.storage2)
        .bind(&patch.storage3)
        .bind(&patch.graphics)
        .bind(&patch.operating_system)
        .bind(&patch.network)
        .bind(&patch.notes)
        .bind(created_by)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// 按 id 更新资产；updated_at 由触发器维护
    pub async fn update(
        &self,
        id: Uuid,
        patch: &AssetPatch,
    ) -> Result<Option<AssetRow>, AppError> {
        let row = sqlx::query_as::<_, AssetRow>(
            r#"
            UPDATE assets SET
                name = $2, asset_type = $3, status = $4, serial_number = $5,
                manufacturer = $6, model = $7, purchase_date = $8,
                warranty_expiry = $9, location = $10, assigned_to = $11,
                ip_address = $12, anydesk_id = $13, division = $14, cpu = $15,
                ram = $16, storage = $17, storage2 = $18, storage3 = $19,
                graphics = $20, operating_system = $21, network = $22,
                notes = $23
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.asset_type)
        .bind(patch.status)
        .bind(&patch.serial_number)
        .bind(&patch.manufacturer)
        .bind(&patch.model)
        .bind(patch.purchase_date)
        .bind(patch.warranty_expiry)
        .bind(&patch.location)
        .bind(&patch.assigned_to)
        .bind(&patch.ip_address)
        .bind(&patch.anydesk_id)
        .bind(&patch.division)
        .bind(&patch.cpu)
        .bind(&patch.ram)
        .bind(&patch.storage)
        .bind(&patch.storage2)
        .bind(&patch.storage3)
        .bind(&patch.graphics)
        .bind(&patch.operating_system)
        .bind(&patch.network)
        .bind(&patch.notes)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// 按 id 删除资产；返回是否确有删除
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
