use crate::{config::Config, store::StoreBackend, websocket::ConnectionRegistry, websocket::Notifier};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StoreBackend>,
    pub registry: ConnectionRegistry,
    pub notifier: Notifier,
    pub config: Arc<Config>,
}
