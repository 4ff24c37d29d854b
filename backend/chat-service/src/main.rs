use chat_service::{
    config, error, logging, routes,
    state::AppState,
    store::RedisBackend,
    websocket::{pubsub::start_pubsub_listener, ConnectionRegistry, Notifier, RedisTransport},
};
use redis_utils::RedisPool;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    logging::init_tracing();
    let cfg = Arc::new(config::Config::from_env()?);

    // One connection manager per process; every component borrows it.
    let redis_pool = RedisPool::connect(&cfg.redis_url)
        .await
        .map_err(|e| error::AppError::StartServer(format!("redis: {e}")))?;

    let store = Arc::new(RedisBackend::new(redis_pool.manager()));
    let notifier = Notifier::new(Arc::new(RedisTransport::new(redis_pool.manager())));
    let registry = ConnectionRegistry::new();

    // Pub/sub needs its own connection, separate from the multiplexed
    // manager; the listener feeds every event back into local sockets.
    let pubsub_client = redis::Client::open(cfg.redis_url.as_str())
        .map_err(|e| error::AppError::StartServer(format!("redis pubsub: {e}")))?;
    let listener_registry = registry.clone();
    tokio::spawn(async move {
        if let Err(e) = start_pubsub_listener(pubsub_client, listener_registry).await {
            tracing::error!(error=%e, "redis pubsub listener failed");
        }
    });

    let state = AppState {
        store,
        registry,
        notifier,
        config: cfg.clone(),
    };

    let app = routes::build_router().with_state(state);

    let bind_addr = format!("0.0.0.0:{}", cfg.port);
    tracing::info!(%bind_addr, "starting chat-service");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| error::AppError::StartServer(e.to_string()))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| error::AppError::StartServer(e.to_string()))?;

    Ok(())
}
