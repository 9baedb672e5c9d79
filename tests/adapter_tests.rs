//! 记录适配器集成测试
//!
//! 覆盖 wire ↔ display 双向映射的完整契约：非空内容逐字段保真，
//! NULL 与空字符串在边界处互换且不丢内容。

use asset_inventory::models::{
    Asset, AssetDraft, AssetRow, AssetStats, AssetStatus, AssetType, Specifications,
};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

fn full_row() -> AssetRow {
    AssetRow {
        id: Uuid::new_v4(),
        name: "Render Node 07".to_string(),
        asset_type: AssetType::Server,
        status: AssetStatus::Maintenance,
        serial_number: "RN-2207".to_string(),
        manufacturer: "Supermicro".to_string(),
        model: "SYS-420GP".to_string(),
        purchase_date: NaiveDate::from_ymd_opt(2022, 11, 3).unwrap(),
        warranty_expiry: Some(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()),
        location: Some("DC-1 Rack 12".to_string()),
        assigned_to: Some("render-farm".to_string()),
        ip_address: Some("10.20.0.17".to_string()),
        anydesk_id: Some("123456789".to_string()),
        division: Some("VFX".to_string()),
        cpu: Some("2x EPYC 7543".to_string()),
        ram: Some("512GB".to_string()),
        storage: Some("2TB NVMe".to_string()),
        storage2: Some("8TB SATA".to_string()),
        storage3: Some("16TB HDD".to_string()),
        graphics: Some("4x RTX A6000".to_string()),
        operating_system: Some("Rocky Linux 9".to_string()),
        network: Some("2x 25GbE".to_string()),
        notes: Some("GPU fan replaced 2024-06".to_string()),
        created_by: Some(Uuid::new_v4()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sparse_row() -> AssetRow {
    AssetRow {
        warranty_expiry: None,
        location: None,
        assigned_to: None,
        ip_address: None,
        anydesk_id: None,
        division: None,
        cpu: None,
        ram: None,
        storage: None,
        storage2: None,
        storage3: None,
        graphics: None,
        operating_system: None,
        network: None,
        notes: None,
        ..full_row()
    }
}

#[test]
fn test_fully_populated_row_round_trips_exactly() {
    let row = full_row();
    let asset = Asset::from(row.clone());

    assert_eq!(asset.last_updated, row.updated_at);
    assert_eq!(asset.specifications.operating_system, "Rocky Linux 9");

    let patch = AssetDraft::from(asset).into_patch();
    assert_eq!(patch.name, row.name);
    assert_eq!(patch.asset_type, row.asset_type);
    assert_eq!(patch.status, row.status);
    assert_eq!(patch.serial_number, row.serial_number);
    assert_eq!(patch.manufacturer, row.manufacturer);
    assert_eq!(patch.model, row.model);
    assert_eq!(patch.purchase_date, row.purchase_date);
    assert_eq!(patch.warranty_expiry, row.warranty_expiry);
    assert_eq!(patch.location, row.location);
    assert_eq!(patch.assigned_to, row.assigned_to);
    assert_eq!(patch.ip_address, row.ip_address);
    assert_eq!(patch.anydesk_id, row.anydesk_id);
    assert_eq!(patch.division, row.division);
    assert_eq!(patch.cpu, row.cpu);
    assert_eq!(patch.ram, row.ram);
    assert_eq!(patch.storage, row.storage);
    assert_eq!(patch.storage2, row.storage2);
    assert_eq!(patch.storage3, row.storage3);
    assert_eq!(patch.graphics, row.graphics);
    assert_eq!(patch.operating_system, row.operating_system);
    assert_eq!(patch.network, row.network);
    assert_eq!(patch.notes, row.notes);
}

#[test]
fn test_null_fields_become_empty_then_null_again() {
    let row = sparse_row();
    let asset = Asset::from(row.clone());

    // 显示侧统一为空字符串
    assert_eq!(asset.location, "");
    assert_eq!(asset.ip_address, "");
    assert!(asset.specifications.is_empty());
    assert!(!asset.has_ip());

    // 回到 wire 侧统一为 NULL
    let patch = AssetDraft::from(asset).into_patch();
    assert_eq!(patch.location, None);
    assert_eq!(patch.assigned_to, None);
    assert_eq!(patch.ip_address, None);
    assert_eq!(patch.notes, None);
    assert_eq!(patch.cpu, None);
    assert_eq!(patch.network, None);
}

#[test]
fn test_draft_json_uses_display_field_names() {
    let json = r#"{
        "name": "Server X",
        "type": "server",
        "status": "active",
        "serialNumber": "SX-1",
        "manufacturer": "Dell",
        "model": "R650",
        "purchaseDate": "2024-05-01",
        "location": "HQ",
        "specifications": { "operatingSystem": "Debian 12" }
    }"#;

    let draft: AssetDraft = serde_json::from_str(json).unwrap();
    assert_eq!(draft.asset_type, AssetType::Server);
    assert_eq!(draft.serial_number, "SX-1");
    assert_eq!(draft.specifications.operating_system, "Debian 12");
    // 未提交的可选字段默认为空
    assert_eq!(draft.ip_address, "");
    assert_eq!(draft.warranty_expiry, None);
}

#[test]
fn test_asset_serializes_with_camel_case_names() {
    let asset = Asset::from(full_row());
    let json = serde_json::to_value(&asset).unwrap();

    assert_eq!(json["type"], "server");
    assert_eq!(json["serialNumber"], "RN-2207");
    assert_eq!(json["specifications"]["operatingSystem"], "Rocky Linux 9");
    assert!(json["lastUpdated"].is_string());
    // wire 侧命名不得泄露到显示侧
    assert!(json.get("serial_number").is_none());
    assert!(json.get("updated_at").is_none());
}

#[test]
fn test_add_asset_scenario_counts() {
    // 新增 active server：列表 +1、新项在最前、Total 与 Active 各 +1
    let mut list: Vec<Asset> = vec![Asset::from(sparse_row())];
    let before = AssetStats::from_assets(&list);

    let mut new_row = full_row();
    new_row.name = "Server X".to_string();
    new_row.status = AssetStatus::Active;
    list.insert(0, Asset::from(new_row));

    let after = AssetStats::from_assets(&list);
    assert_eq!(after.total, before.total + 1);
    assert_eq!(after.active, before.active + 1);
    assert_eq!(list[0].name, "Server X");
}

#[test]
fn test_ip_edit_scenario_moves_asset_in_and_out_of_count() {
    let mut asset = Asset::from(sparse_row());
    assert_eq!(AssetStats::from_assets(std::slice::from_ref(&asset)).used_ip_addresses, 0);

    // 录入 IP 后进入 Used IP Addresses
    let mut draft = AssetDraft::from(asset.clone());
    draft.ip_address = "10.0.0.5".to_string();
    assert_eq!(draft.clone().into_patch().ip_address, Some("10.0.0.5".to_string()));
    asset.ip_address = "10.0.0.5".to_string();
    assert_eq!(AssetStats::from_assets(std::slice::from_ref(&asset)).used_ip_addresses, 1);

    // 清空后移出
    draft.ip_address = String::new();
    assert_eq!(draft.into_patch().ip_address, None);
    asset.ip_address = String::new();
    assert_eq!(AssetStats::from_assets(std::slice::from_ref(&asset)).used_ip_addresses, 0);
}

#[test]
fn test_specifications_partial_population() {
    let mut row = sparse_row();
    row.ram = Some("32GB".to_string());
    let asset = Asset::from(row);

    assert!(!asset.specifications.is_empty());
    assert_eq!(asset.specifications.ram, "32GB");
    assert_eq!(asset.specifications.cpu, "");

    let specs = Specifications { ram: "32GB".to_string(), ..Default::default() };
    assert_eq!(asset.specifications, specs);
}
