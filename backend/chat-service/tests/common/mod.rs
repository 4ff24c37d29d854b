use async_trait::async_trait;
use chat_service::websocket::pubsub::{BroadcastError, EventTransport};
use chat_service::websocket::Notifier;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Transport double that records everything a test publishes.
pub struct RecordingTransport {
    pub published: Mutex<Vec<(String, String)>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            published: Mutex::new(Vec::new()),
        })
    }

    #[allow(dead_code)]
    pub async fn event_names(&self) -> Vec<String> {
        self.published
            .lock()
            .await
            .iter()
            .filter_map(|(_, payload)| {
                serde_json::from_str::<serde_json::Value>(payload)
                    .ok()
                    .and_then(|v| v["event"].as_str().map(str::to_string))
            })
            .collect()
    }
}

#[async_trait]
impl EventTransport for RecordingTransport {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), BroadcastError> {
        self.published
            .lock()
            .await
            .push((channel.to_string(), payload.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub fn recording_notifier() -> (Notifier, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    (Notifier::new(transport.clone()), transport)
}
