//! Real-time change feed fan-out
//!
//! A single broadcast bus carries asset change notifications inside the
//! process. It is fed by the Postgres LISTEN/NOTIFY listener (see
//! `services::inventory`) and drained by the SSE handler, so every browser
//! session observes every change regardless of which session caused it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Store operation that triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

impl FromStr for ChangeOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(ChangeOp::Insert),
            "update" => Ok(ChangeOp::Update),
            "delete" => Ok(ChangeOp::Delete),
            _ => Err(format!("unknown change op: {}", s)),
        }
    }
}

/// Event published on the bus
#[derive(Debug, Clone)]
pub enum AssetEvent {
    /// A row in the assets table changed
    Changed { op: ChangeOp, id: Uuid },
    /// Keep-alive signal for SSE connections
    Heartbeat,
}

impl AssetEvent {
    /// SSE data payload
    pub fn to_sse_data(&self) -> String {
        match self {
            AssetEvent::Changed { op, id } => serde_json::json!({
                "type": "asset_changed",
                "data": { "op": op, "id": id }
            })
            .to_string(),
            AssetEvent::Heartbeat => serde_json::json!({
                "type": "heartbeat",
                "data": { "timestamp": chrono::Utc::now().to_rfc3339() }
            })
            .to_string(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            AssetEvent::Changed { .. } => "asset_changed",
            AssetEvent::Heartbeat => "heartbeat",
        }
    }
}

/// 事件总线
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AssetEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Having no subscribers is not an error; the number
    /// of receivers that saw the event is returned.
    pub fn publish(&self, event: AssetEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AssetEvent> {
        self.sender.subscribe()
    }
}
