//! Filter-sort-search pipeline
//!
//! Derives the displayed list from the full in-memory list. Everything here
//! is a pure function of its inputs and is recomputed from scratch on every
//! request; nothing is patched incrementally. Sorting is stable, so records
//! with equal keys keep their prior relative order (creation time
//! descending, as loaded from the store).

use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{Asset, AssetStatus, AssetType};

/// Sort key for the main asset list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Type,
    Status,
    Location,
    Division,
    Manufacturer,
    PurchaseDate,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "type" => Ok(SortKey::Type),
            "status" => Ok(SortKey::Status),
            "location" => Ok(SortKey::Location),
            "division" => Ok(SortKey::Division),
            "manufacturer" => Ok(SortKey::Manufacturer),
            "purchaseDate" | "purchase_date" => Ok(SortKey::PurchaseDate),
            _ => Err(format!("unknown sort key: {}", s)),
        }
    }
}

/// Filter and sort criteria for the main list
#[derive(Debug, Clone, Default)]
pub struct AssetQuery {
    /// Free-text search; empty passes everything
    pub search: String,
    /// None means "all"
    pub status: Option<AssetStatus>,
    /// None means "all"
    pub asset_type: Option<AssetType>,
    pub sort: SortKey,
}

impl AssetQuery {
    /// Case-insensitive substring match over name, manufacturer, model and
    /// serial number, then exact status/type equality.
    fn matches(&self, asset: &Asset) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || asset.name.to_lowercase().contains(&needle)
            || asset.manufacturer.to_lowercase().contains(&needle)
            || asset.model.to_lowercase().contains(&needle)
            || asset.serial_number.to_lowercase().contains(&needle);

        let matches_status = self.status.map_or(true, |s| asset.status == s);
        let matches_type = self.asset_type.map_or(true, |t| asset.asset_type == t);

        matches_search && matches_status && matches_type
    }

    /// Apply the full pipeline: search, status filter, type filter, sort.
    pub fn apply(&self, assets: &[Asset]) -> Vec<Asset> {
        let mut filtered: Vec<Asset> =
            assets.iter().filter(|a| self.matches(a)).cloned().collect();

        filtered.sort_by(|a, b| compare_by_key(a, b, self.sort));
        filtered
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_by_key(a: &Asset, b: &Asset, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Type => compare_text(a.asset_type.as_str(), b.asset_type.as_str()),
        SortKey::Status => compare_text(a.status.as_str(), b.status.as_str()),
        SortKey::Location => compare_text(&a.location, &b.location),
        SortKey::Division => compare_text(&a.division, &b.division),
        SortKey::Manufacturer => compare_text(&a.manufacturer, &b.manufacturer),
        SortKey::PurchaseDate => a.purchase_date.cmp(&b.purchase_date),
    }
}

/// Sort key for the IP address sub-view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpSortKey {
    #[default]
    IpAddress,
    Name,
    AssignedTo,
}

impl FromStr for IpSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipAddress" | "ip_address" => Ok(IpSortKey::IpAddress),
            "name" => Ok(IpSortKey::Name),
            "assignedTo" | "assigned_to" => Ok(IpSortKey::AssignedTo),
            _ => Err(format!("unknown IP table sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("unknown sort direction: {}", s)),
        }
    }
}

/// One row of the "Used IP Addresses" sub-table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpTableRow {
    pub id: Uuid,
    pub ip_address: String,
    pub name: String,
    pub assigned_to: String,
}

/// Assets with a non-empty IP address, independently sortable.
pub fn ip_table(assets: &[Asset], key: IpSortKey, direction: SortDirection) -> Vec<IpTableRow> {
    let mut rows: Vec<IpTableRow> = assets
        .iter()
        .filter(|a| a.has_ip())
        .map(|a| IpTableRow {
            id: a.id,
            ip_address: a.ip_address.clone(),
            name: a.name.clone(),
            assigned_to: a.assigned_to.clone(),
        })
        .collect();

    rows.sort_by(|a, b| {
        let ord = match key {
            IpSortKey::IpAddress => compare_text(&a.ip_address, &b.ip_address),
            IpSortKey::Name => compare_text(&a.name, &b.name),
            IpSortKey::AssignedTo => compare_text(&a.assigned_to, &b.assigned_to),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    rows
}
