//! 实时事件流处理器（SSE）

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{future, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;

use crate::{auth::middleware::AuthContext, middleware::AppState, realtime::AssetEvent};

/// 订阅资产变更事件流
///
/// 每个变更通知（无论由哪个会话触发）都会推送给所有订阅者；落后的
/// 订阅者丢弃错过的事件而不是断开。
pub async fn subscribe_asset_events(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.event_bus.subscribe();

    let stream = BroadcastStream::new(receiver).filter_map(|result| {
        future::ready(match result {
            Ok(event) => Some(Ok(sse_event(&event))),
            // 接收端落后时跳过错过的事件，连接保持
            Err(_) => None,
        })
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text(AssetEvent::Heartbeat.to_sse_data()),
    )
}

fn sse_event(event: &AssetEvent) -> Event {
    Event::default().event(event.event_type()).data(event.to_sse_data())
}
