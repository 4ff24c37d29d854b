mod common;

use chat_service::config::Config;
use chat_service::routes;
use chat_service::state::AppState;
use chat_service::store::MemoryBackend;
use chat_service::websocket::ConnectionRegistry;
use std::sync::Arc;

async fn start_app() -> (String, Arc<common::RecordingTransport>) {
    let (notifier, transport) = common::recording_notifier();
    let state = AppState {
        store: Arc::new(MemoryBackend::new()),
        registry: ConnectionRegistry::new(),
        notifier,
        config: Arc::new(Config {
            redis_url: "redis://127.0.0.1:6379/0".into(),
            port: 0,
        }),
    };
    let app = routes::build_router().with_state(state);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}"), transport)
}

#[tokio::test]
async fn health_is_public() {
    let (base, _) = start_app().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert!(resp.status().is_success());
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn api_requires_gateway_identity() {
    let (base, _) = start_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/v1/messages"))
        .json(&serde_json::json!({"receiverId": "u2", "content": "hi", "messageType": "text"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn unknown_profile_is_404() {
    let (base, _) = start_app().await;
    let resp = reqwest::Client::new()
        .get(format!("{base}/api/v1/users/ghost"))
        .header("x-user-id", "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn message_lifecycle_over_http() {
    let (base, transport) = start_app().await;
    let client = reqwest::Client::new();

    // profile sync for the sender
    let resp = client
        .put(format!("{base}/api/v1/profile"))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"name": "Alice", "image": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    let resp = client
        .get(format!("{base}/api/v1/users/u1"))
        .header("x-user-id", "u2")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let profile: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(profile["name"], "Alice");

    // u1 sends a message to u2
    let resp = client
        .post(format!("{base}/api/v1/messages"))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"receiverId": "u2", "content": "hi", "messageType": "text"}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let receipt: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(receipt["conversationId"], "conversation:u1:u2");
    let message_id = receipt["messageId"].as_str().unwrap().to_string();

    // either participant reads the same history
    let resp = client
        .get(format!("{base}/api/v1/conversations/with/u1/messages"))
        .header("x-user-id", "u2")
        .send()
        .await
        .unwrap();
    let history: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["senderId"], "u1");
    assert_eq!(history[0]["content"], "hi");
    assert_eq!(history[0]["messageType"], "text");

    // the receiver may not edit
    let resp = client
        .put(format!("{base}/api/v1/messages/{message_id}"))
        .header("x-user-id", "u2")
        .json(&serde_json::json!({"receiverId": "u1", "content": "hacked"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "NOT_MESSAGE_SENDER");

    // the sender may
    let resp = client
        .put(format!("{base}/api/v1/messages/{message_id}"))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"receiverId": "u2", "content": "hi there"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    // delete and verify the log is empty
    let resp = client
        .delete(format!("{base}/api/v1/messages/{message_id}"))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"receiverId": "u2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    let resp = client
        .get(format!("{base}/api/v1/conversations/with/u2/messages"))
        .header("x-user-id", "u1")
        .send()
        .await
        .unwrap();
    let history: serde_json::Value = resp.json().await.unwrap();
    assert!(history.as_array().unwrap().is_empty());

    // every mutation produced exactly one event on the shared pair channel
    assert_eq!(
        transport.event_names().await,
        vec!["message.created", "message.edited", "message.deleted"]
    );
}

#[tokio::test]
async fn deleting_a_missing_message_is_404() {
    let (base, _) = start_app().await;
    let resp = reqwest::Client::new()
        .delete(format!("{base}/api/v1/messages/message:1:zzzzzzz"))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"receiverId": "u2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "MESSAGE_NOT_FOUND");
}
