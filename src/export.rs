//! Export adapters
//!
//! Two ways out of the system: a quoted CSV blob offered as a file
//! download, and a JSON POST of the full list to a caller-supplied webhook
//! URL. Both always operate on the unfiltered list.

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::error::AppError;
use crate::models::Asset;

/// Fixed CSV column order. The IP address and remote-access id are
/// deliberately not exported.
pub const CSV_HEADERS: [&str; 20] = [
    "Name",
    "Type",
    "Status",
    "Serial Number",
    "Manufacturer",
    "Model",
    "Purchase Date",
    "Warranty Expiry",
    "Location",
    "Assigned To",
    "Division",
    "CPU",
    "RAM",
    "Primary Storage",
    "Secondary Storage",
    "Additional Storage",
    "Graphics",
    "Operating System",
    "Network",
    "Notes",
];

/// Every field is double-quoted; embedded quotes are doubled.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv_row(fields: &[String]) -> String {
    fields.iter().map(|f| quote(f)).collect::<Vec<_>>().join(",")
}

/// Serialize the full list to CSV: one header row plus one row per asset,
/// newline-joined.
pub fn generate_csv(assets: &[Asset]) -> String {
    let header = CSV_HEADERS.iter().map(|h| quote(h)).collect::<Vec<_>>().join(",");

    let mut lines = Vec::with_capacity(assets.len() + 1);
    lines.push(header);

    for asset in assets {
        let fields = vec![
            asset.name.clone(),
            asset.asset_type.as_str().to_string(),
            asset.status.as_str().to_string(),
            asset.serial_number.clone(),
            asset.manufacturer.clone(),
            asset.model.clone(),
            asset.purchase_date.to_string(),
            asset.warranty_expiry.map(|d| d.to_string()).unwrap_or_default(),
            asset.location.clone(),
            asset.assigned_to.clone(),
            asset.division.clone(),
            asset.specifications.cpu.clone(),
            asset.specifications.ram.clone(),
            asset.specifications.storage.clone(),
            asset.specifications.storage2.clone(),
            asset.specifications.storage3.clone(),
            asset.specifications.graphics.clone(),
            asset.specifications.operating_system.clone(),
            asset.specifications.network.clone(),
            asset.notes.clone(),
        ];
        lines.push(csv_row(&fields));
    }

    lines.join("\n")
}

/// Download filename: `assets-YYYY-MM-DD.csv` dated at export time
pub fn csv_filename(date: NaiveDate) -> String {
    format!("assets-{}.csv", date)
}

/// Webhook payload: the full list plus an export timestamp and the origin
/// that triggered the export
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    assets: &'a [Asset],
    timestamp: String,
    triggered_from: &'a str,
}

/// Posts the asset list to a user-supplied webhook endpoint.
///
/// Failures are always surfaced to the caller; nothing is fired and
/// forgotten.
pub struct WebhookExporter {
    client: Client,
    origin: String,
}

impl WebhookExporter {
    pub fn new(origin: String, timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, origin })
    }

    /// POST the full list as JSON. No response body is consumed; a non-2xx
    /// status or a network error is reported as an export failure.
    pub async fn send(&self, webhook_url: &str, assets: &[Asset]) -> Result<(), AppError> {
        let payload = WebhookPayload {
            assets,
            timestamp: Utc::now().to_rfc3339(),
            triggered_from: &self.origin,
        };

        let response = self
            .client
            .post(webhook_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %webhook_url, error = %e, "Webhook export failed");
                AppError::ExportFailed(format!("webhook request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(url = %webhook_url, status = %status, "Webhook rejected export");
            return Err(AppError::ExportFailed(format!(
                "webhook returned status {}",
                status
            )));
        }

        tracing::info!(url = %webhook_url, count = assets.len(), "Webhook export delivered");
        Ok(())
    }
}
