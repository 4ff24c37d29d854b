use crate::websocket::{ChatEvent, ConnectionRegistry};
use async_trait::async_trait;
use axum::extract::ws::Message;
use futures_util::StreamExt;
use redis::AsyncCommands;
use redis_utils::SharedConnectionManager;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Channel for a pair of participants: sorted ids joined by `__`.
///
/// Must stay identical on the publish and subscribe sides, whichever
/// participant derives it.
pub fn channel_for_pair(user_a: &str, user_b: &str) -> String {
    let mut pair = [user_a, user_b];
    pair.sort_unstable();
    format!("{}__{}", pair[0], pair[1])
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("failed to serialize event: {0}")]
    Serialization(String),

    #[error("failed to publish event: {0}")]
    Transport(String),
}

/// Fire-and-forget delivery to a named channel.
#[async_trait]
pub trait EventTransport: Send + Sync {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), BroadcastError>;
}

/// Publishes over the shared Redis connection manager.
pub struct RedisTransport {
    manager: SharedConnectionManager,
}

impl RedisTransport {
    pub fn new(manager: SharedConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl EventTransport for RedisTransport {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), BroadcastError> {
        let mut conn = self.manager.lock().await.clone();
        conn.publish::<_, _, ()>(channel, payload)
            .await
            .map_err(|e| BroadcastError::Transport(e.to_string()))
    }
}

/// Best-effort notifier over any [`EventTransport`].
///
/// Delivery is at-most-once: failures are logged and swallowed, never
/// surfaced to the caller. The store write remains the durable truth and
/// a missed event is recoverable by re-fetching history.
#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn EventTransport>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn EventTransport>) -> Self {
        Self { transport }
    }

    pub async fn notify(&self, user_a: &str, user_b: &str, event: ChatEvent) {
        let channel = channel_for_pair(user_a, user_b);
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, event = event.event_type(), "failed to serialize event");
                return;
            }
        };
        if let Err(e) = self.transport.publish(&channel, &payload).await {
            warn!(error = %e, %channel, event = event.event_type(), "event publish failed");
        }
    }
}

/// Bridge Redis pub/sub into the in-process connection registry.
///
/// Pair channels always contain `__`, so one pattern subscription covers
/// every conversation. PubSub requires a dedicated connection, not the
/// multiplexed manager.
pub async fn start_pubsub_listener(
    client: redis::Client,
    registry: ConnectionRegistry,
) -> redis::RedisResult<()> {
    let conn = client.get_async_connection().await?;
    let mut pubsub = conn.into_pubsub();
    pubsub.psubscribe("*__*").await?;
    let mut stream = pubsub.on_message();
    while let Some(msg) = stream.next().await {
        let channel: String = msg.get_channel_name().into();
        let payload: String = msg.get_payload()?;
        registry.broadcast(&channel, Message::Text(payload)).await;
    }
    Ok(())
}
