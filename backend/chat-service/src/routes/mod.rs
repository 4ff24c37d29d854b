use crate::state::AppState;
use axum::middleware;
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

pub mod messages;
use messages::{delete_message, get_message_history, send_message, update_message};
pub mod users;
use users::{get_user, sync_profile};

use crate::websocket::handlers::ws_handler;

// OpenAPI endpoint handler
async fn openapi_json() -> Json<serde_json::Value> {
    use utoipa::OpenApi;
    Json(serde_json::to_value(&crate::openapi::ApiDoc::openapi()).unwrap())
}

// Swagger UI handler
async fn swagger_ui() -> axum::response::Html<&'static str> {
    axum::response::Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Courier Chat Service API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: "/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>"#,
    )
}

// Documentation entry point
async fn docs() -> axum::response::Html<&'static str> {
    axum::response::Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Courier Chat Service API</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 40px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #333; }
        a { display: block; margin: 15px 0; padding: 15px; background: #28a745; color: white; text-decoration: none; border-radius: 4px; }
        a:hover { background: #218838; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Courier Chat Service API</h1>
        <p>Choose your preferred documentation viewer:</p>
        <a href="/swagger-ui">Swagger UI (Interactive)</a>
        <a href="/openapi.json">OpenAPI JSON (Raw)</a>
    </div>
</body>
</html>"#,
    )
}

// Metrics endpoint for monitoring
async fn metrics() -> String {
    json!({
        "service": "chat-service",
        "version": "0.1.0",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
    .to_string()
}

pub fn build_router() -> Router<AppState> {
    // Service introspection endpoints (no API version prefix, no auth;
    // healthchecks must stay reachable)
    let introspection = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/metrics", get(metrics))
        .route("/openapi.json", get(openapi_json))
        .route("/swagger-ui", get(swagger_ui))
        .route("/docs", get(docs));

    // API v1 endpoints, behind the gateway-identity middleware
    let api_v1 = Router::new()
        .route("/messages", post(send_message))
        .route(
            "/messages/:message_id",
            put(update_message).delete(delete_message),
        )
        .route(
            "/conversations/with/:user_id/messages",
            get(get_message_history),
        )
        .route("/profile", put(sync_profile))
        .route("/users/:user_id", get(get_user))
        .layer(middleware::from_fn(
            crate::middleware::auth::auth_middleware,
        ));

    // Browser WebSocket clients cannot set headers on the upgrade request,
    // so /ws carries identity in query params and validates them itself
    let ws = Router::new().route("/ws", get(ws_handler));

    let router = introspection.merge(Router::new().nest("/api/v1", api_v1.merge(ws)));

    crate::middleware::with_defaults(router)
}
