/// OpenAPI documentation for the Courier chat service
use crate::models::{Message, MessageType, UserProfile};
use crate::services::message_service::SendReceipt;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courier Chat Service API",
        version = "1.0.0",
        description = "Direct-message conversations, message history, and real-time delivery",
        contact(
            name = "Courier Team",
            email = "support@courier.dev"
        ),
        license(
            name = "MIT"
        )
    ),
    components(schemas(Message, MessageType, UserProfile, SendReceipt)),
    tags(
        (name = "Health", description = "Service health checks"),
        (name = "Messages", description = "Send, edit, delete and fetch messages"),
        (name = "Users", description = "User profile sync"),
        (name = "WebSocket", description = "Real-time delivery of message events"),
    )
)]
pub struct ApiDoc;
