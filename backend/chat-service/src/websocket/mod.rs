use axum::extract::ws::Message;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    RwLock,
};

pub mod events;
pub mod handlers;
pub mod pubsub;

pub use events::ChatEvent;
pub use pubsub::{channel_for_pair, EventTransport, Notifier, RedisTransport};

/// Live WebSocket subscribers, keyed by pair channel name.
#[derive(Default, Clone)]
pub struct ConnectionRegistry {
    inner: Arc<RwLock<HashMap<String, Vec<UnboundedSender<Message>>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_subscriber(&self, channel: &str) -> UnboundedReceiver<Message> {
        let (tx, rx) = unbounded_channel();
        let mut guard = self.inner.write().await;
        guard.entry(channel.to_string()).or_default().push(tx);
        rx
    }

    /// Deliver to every live subscriber of the channel, dropping any whose
    /// socket task has gone away.
    pub async fn broadcast(&self, channel: &str, msg: Message) {
        let mut guard = self.inner.write().await;
        if let Some(list) = guard.get_mut(channel) {
            list.retain(|sender| sender.send(msg.clone()).is_ok());
            if list.is_empty() {
                guard.remove(channel);
            }
        }
    }
}
