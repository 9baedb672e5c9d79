//! Asset domain models
//!
//! Two shapes exist for the same record: the wire shape ([`AssetRow`],
//! snake_case, nullable columns) used only at the store boundary, and the
//! display shape ([`Asset`], camelCase, empty string for absent text) used
//! everywhere else. The mapping between them is total and pure and loses no
//! content: NULL on the wire side becomes `""` on the display side, and an
//! empty optional field collapses back to NULL on the way in.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Hardware category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "asset_type", rename_all = "lowercase")]
pub enum AssetType {
    Desktop,
    Laptop,
    Server,
    Other,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Desktop => "desktop",
            AssetType::Laptop => "laptop",
            AssetType::Server => "server",
            AssetType::Other => "other",
        }
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(AssetType::Desktop),
            "laptop" => Ok(AssetType::Laptop),
            "server" => Ok(AssetType::Server),
            "other" => Ok(AssetType::Other),
            _ => Err(format!("unknown asset type: {}", s)),
        }
    }
}

/// Lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "asset_status", rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Maintenance,
    Retired,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Maintenance => "maintenance",
            AssetStatus::Retired => "retired",
        }
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AssetStatus::Active),
            "maintenance" => Ok(AssetStatus::Maintenance),
            "retired" => Ok(AssetStatus::Retired),
            _ => Err(format!("unknown asset status: {}", s)),
        }
    }
}

/// Wire shape: one row of the `assets` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssetRow {
    pub id: Uuid,
    pub name: String,
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub serial_number: String,
    pub manufacturer: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: Option<String>,
    pub assigned_to: Option<String>,
    pub ip_address: Option<String>,
    pub anydesk_id: Option<String>,
    pub division: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub storage2: Option<String>,
    pub storage3: Option<String>,
    pub graphics: Option<String>,
    pub operating_system: Option<String>,
    pub network: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Hardware specifications, nested in the display shape.
/// All eight fields empty means "no specifications recorded".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Specifications {
    pub cpu: String,
    pub ram: String,
    pub storage: String,
    pub storage2: String,
    pub storage3: String,
    pub graphics: String,
    pub operating_system: String,
    pub network: String,
}

impl Specifications {
    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
            && self.ram.is_empty()
            && self.storage.is_empty()
            && self.storage2.is_empty()
            && self.storage3.is_empty()
            && self.graphics.is_empty()
            && self.operating_system.is_empty()
            && self.network.is_empty()
    }
}

/// Display shape: what handlers and the pipeline work with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub serial_number: String,
    pub manufacturer: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: String,
    pub assigned_to: String,
    pub ip_address: String,
    pub anydesk_id: String,
    pub division: String,
    pub specifications: Specifications,
    pub notes: String,
    pub last_updated: DateTime<Utc>,
}

impl Asset {
    /// Non-empty after trimming, the predicate behind the "Used IP
    /// Addresses" tile and the IP sub-table.
    pub fn has_ip(&self) -> bool {
        !self.ip_address.trim().is_empty()
    }
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

impl From<AssetRow> for Asset {
    fn from(row: AssetRow) -> Self {
        Asset {
            id: row.id,
            name: row.name,
            asset_type: row.asset_type,
            status: row.status,
            serial_number: row.serial_number,
            manufacturer: row.manufacturer,
            model: row.model,
            purchase_date: row.purchase_date,
            warranty_expiry: row.warranty_expiry,
            location: text(row.location),
            assigned_to: text(row.assigned_to),
            ip_address: text(row.ip_address),
            anydesk_id: text(row.anydesk_id),
            division: text(row.division),
            specifications: Specifications {
                cpu: text(row.cpu),
                ram: text(row.ram),
                storage: text(row.storage),
                storage2: text(row.storage2),
                storage3: text(row.storage3),
                graphics: text(row.graphics),
                operating_system: text(row.operating_system),
                network: text(row.network),
            },
            notes: text(row.notes),
            last_updated: row.updated_at,
        }
    }
}

/// Client-submitted form input. Never carries id, timestamps or ownership;
/// those are assigned by the store and round-tripped opaquely.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssetDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub status: AssetStatus,
    #[validate(length(min = 1, message = "serial number is required"))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "manufacturer is required"))]
    pub manufacturer: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub warranty_expiry: Option<NaiveDate>,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub anydesk_id: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub notes: String,
}

/// Write shape: the column values an insert or update may touch
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPatch {
    pub name: String,
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub serial_number: String,
    pub manufacturer: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: Option<String>,
    pub assigned_to: Option<String>,
    pub ip_address: Option<String>,
    pub anydesk_id: Option<String>,
    pub division: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub storage2: Option<String>,
    pub storage3: Option<String>,
    pub graphics: Option<String>,
    pub operating_system: Option<String>,
    pub network: Option<String>,
    pub notes: Option<String>,
}

fn nullable(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl AssetDraft {
    /// Convert to the wire write shape. Empty optional text collapses to
    /// NULL; only the IP address is trimmed.
    pub fn into_patch(self) -> AssetPatch {
        let specs = self.specifications;
        AssetPatch {
            name: self.name,
            asset_type: self.asset_type,
            status: self.status,
            serial_number: self.serial_number,
            manufacturer: self.manufacturer,
            model: self.model,
            purchase_date: self.purchase_date,
            warranty_expiry: self.warranty_expiry,
            location: nullable(self.location),
            assigned_to: nullable(self.assigned_to),
            ip_address: nullable(self.ip_address.trim().to_string()),
            anydesk_id: nullable(self.anydesk_id),
            division: nullable(self.division),
            cpu: nullable(specs.cpu),
            ram: nullable(specs.ram),
            storage: nullable(specs.storage),
            storage2: nullable(specs.storage2),
            storage3: nullable(specs.storage3),
            graphics: nullable(specs.graphics),
            operating_system: nullable(specs.operating_system),
            network: nullable(specs.network),
            notes: nullable(self.notes),
        }
    }
}

/// Display → form input, used when editing an existing record
impl From<Asset> for AssetDraft {
    fn from(asset: Asset) -> Self {
        AssetDraft {
            name: asset.name,
            asset_type: asset.asset_type,
            status: asset.status,
            serial_number: asset.serial_number,
            manufacturer: asset.manufacturer,
            model: asset.model,
            purchase_date: asset.purchase_date,
            warranty_expiry: asset.warranty_expiry,
            location: asset.location,
            assigned_to: asset.assigned_to,
            ip_address: asset.ip_address,
            anydesk_id: asset.anydesk_id,
            division: asset.division,
            specifications: asset.specifications,
            notes: asset.notes,
        }
    }
}

/// Stat tile counts, computed from the unfiltered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStats {
    pub total: usize,
    pub active: usize,
    pub maintenance: usize,
    pub retired: usize,
    pub used_ip_addresses: usize,
}

impl AssetStats {
    pub fn from_assets(assets: &[Asset]) -> Self {
        AssetStats {
            total: assets.len(),
            active: assets.iter().filter(|a| a.status == AssetStatus::Active).count(),
            maintenance: assets
                .iter()
                .filter(|a| a.status == AssetStatus::Maintenance)
                .count(),
            retired: assets.iter().filter(|a| a.status == AssetStatus::Retired).count(),
            used_ip_addresses: assets.iter().filter(|a| a.has_ip()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> AssetRow {
        AssetRow {
            id: Uuid::new_v4(),
            name: "Build Server".to_string(),
            asset_type: AssetType::Server,
            status: AssetStatus::Active,
            serial_number: "SN-1001".to_string(),
            manufacturer: "Dell".to_string(),
            model: "PowerEdge R740".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2023, 4, 12).unwrap(),
            warranty_expiry: None,
            location: Some("Rack 3".to_string()),
            assigned_to: None,
            ip_address: Some("10.0.0.5".to_string()),
            anydesk_id: None,
            division: None,
            cpu: Some("2x Xeon Gold".to_string()),
            ram: Some("256GB".to_string()),
            storage: None,
            storage2: None,
            storage3: None,
            graphics: None,
            operating_system: Some("Ubuntu 22.04".to_string()),
            network: None,
            notes: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_null_text_becomes_empty_string() {
        let asset = Asset::from(sample_row());
        assert_eq!(asset.assigned_to, "");
        assert_eq!(asset.division, "");
        assert_eq!(asset.notes, "");
        assert_eq!(asset.location, "Rack 3");
        assert_eq!(asset.specifications.ram, "256GB");
        assert_eq!(asset.specifications.graphics, "");
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let row = sample_row();
        let asset = Asset::from(row.clone());
        let patch = AssetDraft::from(asset).into_patch();

        assert_eq!(patch.name, row.name);
        assert_eq!(patch.serial_number, row.serial_number);
        assert_eq!(patch.purchase_date, row.purchase_date);
        assert_eq!(patch.location, row.location);
        assert_eq!(patch.ip_address, row.ip_address);
        // NULL on the wire side stays NULL after a full round trip
        assert_eq!(patch.assigned_to, None);
        assert_eq!(patch.division, None);
        assert_eq!(patch.storage, None);
        assert_eq!(patch.operating_system, row.operating_system);
    }

    #[test]
    fn test_ip_address_trimmed_and_nulled() {
        let mut draft = AssetDraft::from(Asset::from(sample_row()));
        draft.ip_address = "  10.0.0.9  ".to_string();
        assert_eq!(draft.clone().into_patch().ip_address, Some("10.0.0.9".to_string()));

        draft.ip_address = "   ".to_string();
        assert_eq!(draft.into_patch().ip_address, None);
    }

    #[test]
    fn test_specifications_is_empty() {
        assert!(Specifications::default().is_empty());
        let specs = Specifications { cpu: "i7".to_string(), ..Default::default() };
        assert!(!specs.is_empty());
    }

    #[test]
    fn test_enum_parse() {
        assert_eq!("server".parse::<AssetType>().unwrap(), AssetType::Server);
        assert_eq!("maintenance".parse::<AssetStatus>().unwrap(), AssetStatus::Maintenance);
        assert!("printer".parse::<AssetType>().is_err());
        assert!("broken".parse::<AssetStatus>().is_err());
    }

    #[test]
    fn test_stats_from_assets() {
        let mut a = Asset::from(sample_row());
        a.status = AssetStatus::Active;
        let mut b = a.clone();
        b.status = AssetStatus::Maintenance;
        b.ip_address = String::new();
        let mut c = a.clone();
        c.status = AssetStatus::Retired;
        c.ip_address = "   ".to_string();

        let stats = AssetStats::from_assets(&[a, b, c]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.maintenance, 1);
        assert_eq!(stats.retired, 1);
        // whitespace-only IPs do not count as used
        assert_eq!(stats.used_ip_addresses, 1);
    }
}
