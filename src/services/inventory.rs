//! Inventory service
//!
//! Single owner of the in-memory asset list. The list is mutated only here,
//! and only in response to confirmed store operations or full reloads. A
//! spawned change-feed task listens on the store's NOTIFY channel and
//! triggers a full reload on every notification, whichever session caused
//! it; its handle aborts the task when the owner is torn down, so the
//! subscription is released exactly once.

use sqlx::postgres::PgListener;
use sqlx::PgPool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Asset, AssetDraft, AssetStats};
use crate::realtime::{AssetEvent, EventBus};
use crate::repository::AssetRepository;

/// NOTIFY channel raised by the row trigger on the assets table
pub const CHANGE_CHANNEL: &str = "asset_changes";

/// Payload shape of a change notification
#[derive(Debug, serde::Deserialize)]
struct ChangePayload {
    op: String,
    id: Uuid,
}

fn parse_notification(payload: &str) -> Option<AssetEvent> {
    let parsed: ChangePayload = serde_json::from_str(payload)
        .map_err(|e| tracing::warn!(payload = %payload, error = %e, "Bad change payload"))
        .ok()?;
    let op = parsed
        .op
        .parse()
        .map_err(|e: String| tracing::warn!(error = %e, "Bad change payload"))
        .ok()?;
    Some(AssetEvent::Changed { op, id: parsed.id })
}

pub struct InventoryService {
    db: PgPool,
    repo: AssetRepository,
    event_bus: Arc<EventBus>,
    cache: RwLock<Vec<Asset>>,
    /// Sticky until the next successful reload
    load_error: RwLock<Option<String>>,
    loaded: AtomicBool,
}

impl InventoryService {
    pub fn new(db: PgPool, event_bus: Arc<EventBus>) -> Self {
        Self {
            repo: AssetRepository::new(db.clone()),
            db,
            event_bus,
            cache: RwLock::new(Vec::new()),
            load_error: RwLock::new(None),
            loaded: AtomicBool::new(false),
        }
    }

    /// Full reload from the store, ordered by creation time descending.
    /// On failure the previous list stays available and the error is sticky.
    pub async fn reload(&self) -> Result<usize, AppError> {
        match self.repo.list_all().await {
            Ok(rows) => {
                let assets: Vec<Asset> = rows.into_iter().map(Asset::from).collect();
                let count = assets.len();
                *self.cache.write().await = assets;
                *self.load_error.write().await = None;
                self.loaded.store(true, Ordering::Release);
                metrics::gauge!("inventory.assets").set(count as f64);
                tracing::debug!(count, "Asset list reloaded");
                Ok(count)
            }
            Err(e) => {
                *self.load_error.write().await = Some(e.user_message());
                tracing::error!(error = %e, "Failed to load assets, keeping stale list");
                Err(e)
            }
        }
    }

    /// Insert a new asset and prepend the canonical stored record to the
    /// list. There is no optimistic insert; a failed write leaves the list
    /// untouched.
    pub async fn add(&self, draft: AssetDraft, owner: Uuid) -> Result<Asset, AppError> {
        let patch = draft.into_patch();
        let row = self.repo.create(&patch, Some(owner)).await?;
        let asset = Asset::from(row);

        self.cache.write().await.insert(0, asset.clone());
        metrics::counter!("inventory.assets.created").increment(1);
        tracing::info!(id = %asset.id, name = %asset.name, "Asset created");
        Ok(asset)
    }

    /// Update by id and replace the cache entry with the stored record.
    pub async fn update(&self, id: Uuid, draft: AssetDraft) -> Result<Asset, AppError> {
        let patch = draft.into_patch();
        let row = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("asset"))?;
        let asset = Asset::from(row);

        let mut cache = self.cache.write().await;
        if let Some(entry) = cache.iter_mut().find(|a| a.id == id) {
            *entry = asset.clone();
        }
        drop(cache);

        metrics::counter!("inventory.assets.updated").increment(1);
        tracing::info!(id = %asset.id, "Asset updated");
        Ok(asset)
    }

    /// Delete by id; the cache entry goes away only after the store
    /// confirms the delete.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("asset"));
        }

        self.cache.write().await.retain(|a| a.id != id);
        metrics::counter!("inventory.assets.deleted").increment(1);
        tracing::info!(id = %id, "Asset deleted");
        Ok(())
    }

    /// Get one asset from the cache
    pub async fn get(&self, id: Uuid) -> Option<Asset> {
        self.cache.read().await.iter().find(|a| a.id == id).cloned()
    }

    /// Clone of the full unfiltered list
    pub async fn snapshot(&self) -> Vec<Asset> {
        self.cache.read().await.clone()
    }

    /// Stat tile counts over the full list
    pub async fn stats(&self) -> AssetStats {
        AssetStats::from_assets(&self.cache.read().await)
    }

    /// Whether an initial load has succeeded at least once
    pub fn loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Last load failure, sticky until the next successful reload
    pub async fn last_error(&self) -> Option<String> {
        self.load_error.read().await.clone()
    }

    /// Spawn the change-feed task: LISTEN on the NOTIFY channel, reload on
    /// every notification and republish it on the event bus for SSE
    /// subscribers. The returned handle aborts the task on drop.
    pub fn spawn_change_feed(self: &Arc<Self>) -> ChangeFeedHandle {
        let service = Arc::clone(self);
        let task = tokio::spawn(async move {
            service.run_change_feed().await;
        });
        ChangeFeedHandle { task }
    }

    async fn run_change_feed(&self) {
        loop {
            let mut listener = match PgListener::connect_with(&self.db).await {
                Ok(listener) => listener,
                Err(e) => {
                    tracing::warn!(error = %e, "Change feed connect failed, retrying");
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    continue;
                }
            };

            if let Err(e) = listener.listen(CHANGE_CHANNEL).await {
                tracing::warn!(error = %e, "Change feed LISTEN failed, retrying");
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }

            tracing::info!(channel = CHANGE_CHANNEL, "Change feed subscribed");

            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        // Full reload rather than an incremental patch, so
                        // local state cannot diverge from concurrent remote
                        // edits.
                        if let Err(e) = self.reload().await {
                            tracing::warn!(error = %e, "Reload after change notification failed");
                        }
                        if let Some(event) = parse_notification(notification.payload()) {
                            self.event_bus.publish(event);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Change feed connection lost, reconnecting");
                        break;
                    }
                }
            }

            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    }
}

/// Owns the change-feed task. Dropping the handle aborts the task and with
/// it the store subscription.
pub struct ChangeFeedHandle {
    task: JoinHandle<()>,
}

impl ChangeFeedHandle {
    pub fn shutdown(self) {
        self.task.abort();
        tracing::info!("Change feed subscription released");
    }
}

impl Drop for ChangeFeedHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
