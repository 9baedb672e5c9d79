//! 过滤-排序-搜索流水线集成测试

use asset_inventory::models::{Asset, AssetStatus, AssetType, Specifications};
use asset_inventory::pipeline::{ip_table, AssetQuery, IpSortKey, SortDirection, SortKey};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

fn asset(name: &str, asset_type: AssetType, status: AssetStatus) -> Asset {
    Asset {
        id: Uuid::new_v4(),
        name: name.to_string(),
        asset_type,
        status,
        serial_number: format!("SN-{}", name.replace(' ', "-")),
        manufacturer: "Generic".to_string(),
        model: "Model A".to_string(),
        purchase_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        warranty_expiry: None,
        location: "HQ".to_string(),
        assigned_to: String::new(),
        ip_address: String::new(),
        anydesk_id: String::new(),
        division: String::new(),
        specifications: Specifications::default(),
        notes: String::new(),
        last_updated: Utc::now(),
    }
}

fn sample_inventory() -> Vec<Asset> {
    let mut inventory = vec![
        asset("Reception Desktop", AssetType::Desktop, AssetStatus::Active),
        asset("CEO Laptop", AssetType::Laptop, AssetStatus::Active),
        asset("Build Server", AssetType::Server, AssetStatus::Active),
        asset("Loaner Laptop", AssetType::Laptop, AssetStatus::Maintenance),
        asset("Old File Server", AssetType::Server, AssetStatus::Maintenance),
        asset("Legacy Tower", AssetType::Desktop, AssetStatus::Retired),
    ];
    inventory[0].manufacturer = "HP".to_string();
    inventory[1].manufacturer = "Apple".to_string();
    inventory[2].manufacturer = "Dell".to_string();
    inventory
}

#[test]
fn test_maintenance_filter_scenario() {
    // 3 active + 2 maintenance + 1 retired → maintenance 过滤出恰好 2 条
    let query = AssetQuery { status: Some(AssetStatus::Maintenance), ..Default::default() };
    let result = query.apply(&sample_inventory());
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|a| a.status == AssetStatus::Maintenance));
}

#[test]
fn test_filtered_output_is_exact_matching_subset() {
    let inventory = sample_inventory();
    let query = AssetQuery {
        search: "laptop".to_string(),
        status: Some(AssetStatus::Active),
        ..Default::default()
    };
    let result = query.apply(&inventory);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "CEO Laptop");

    // 输出必须是输入的子集，不得伪造记录
    for item in &result {
        assert!(inventory.iter().any(|a| a.id == item.id));
    }
}

#[test]
fn test_search_covers_manufacturer_and_serial() {
    let inventory = sample_inventory();

    let query = AssetQuery { search: "apple".to_string(), ..Default::default() };
    assert_eq!(query.apply(&inventory).len(), 1);

    let query = AssetQuery { search: "sn-build".to_string(), ..Default::default() };
    assert_eq!(query.apply(&inventory)[0].name, "Build Server");
}

#[test]
fn test_combined_filters_and_sort() {
    let inventory = sample_inventory();
    let query = AssetQuery {
        asset_type: Some(AssetType::Server),
        sort: SortKey::Name,
        ..Default::default()
    };
    let names: Vec<String> = query.apply(&inventory).into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Build Server", "Old File Server"]);
}

#[test]
fn test_sort_by_manufacturer() {
    let inventory = sample_inventory();
    let query = AssetQuery { sort: SortKey::Manufacturer, ..Default::default() };
    let result = query.apply(&inventory);

    // 空 manufacturer 不存在于样本；Apple < Dell < Generic < HP（大小写无关）
    assert_eq!(result[0].manufacturer, "Apple");
    assert_eq!(result[1].manufacturer, "Dell");
}

#[test]
fn test_total_order_under_selected_key() {
    let inventory = sample_inventory();
    let query = AssetQuery { sort: SortKey::Name, ..Default::default() };
    let result = query.apply(&inventory);

    for pair in result.windows(2) {
        assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
    }
}

#[test]
fn test_refiltering_after_reload_keeps_criteria() {
    // 模拟变更通知后的整表重载：同一条件应用到新列表
    let mut inventory = sample_inventory();
    let query = AssetQuery { status: Some(AssetStatus::Active), ..Default::default() };
    assert_eq!(query.apply(&inventory).len(), 3);

    // 远端新增一台 active 资产后重载
    inventory.insert(0, asset("New Kiosk", AssetType::Other, AssetStatus::Active));
    assert_eq!(query.apply(&inventory).len(), 4);
}

#[test]
fn test_ip_table_direction_toggle() {
    let mut inventory = sample_inventory();
    inventory[2].ip_address = "10.0.0.30".to_string();
    inventory[2].assigned_to = "ci".to_string();
    inventory[4].ip_address = "10.0.0.10".to_string();

    let ascending = ip_table(&inventory, IpSortKey::IpAddress, SortDirection::Ascending);
    let descending = ip_table(&inventory, IpSortKey::IpAddress, SortDirection::Descending);

    assert_eq!(ascending.len(), 2);
    assert_eq!(ascending[0].ip_address, "10.0.0.10");
    assert_eq!(descending[0].ip_address, "10.0.0.30");

    let by_assignee = ip_table(&inventory, IpSortKey::AssignedTo, SortDirection::Ascending);
    // 空 assigned_to 排在最前
    assert_eq!(by_assignee[0].assigned_to, "");
}
