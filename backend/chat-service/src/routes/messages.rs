use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::{Message, MessageType};
use crate::services::message_service::{MessageService, SendReceipt};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: String,
    pub content: String,
    pub message_type: MessageType,
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(CurrentUser(sender_id)): Extension<CurrentUser>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<SendReceipt>, AppError> {
    let receipt = MessageService::send(
        state.store.as_ref(),
        &state.notifier,
        &sender_id,
        &body.receiver_id,
        &body.content,
        body.message_type,
    )
    .await?;
    Ok(Json(receipt))
}

/// History of the conversation between the caller and the named peer.
/// Both participant ids are explicit inputs: the caller can only read
/// pairs it is itself part of.
pub async fn get_message_history(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(peer_id): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = MessageService::history(state.store.as_ref(), &user_id, &peer_id).await?;
    Ok(Json(messages))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    pub receiver_id: String,
    pub content: String,
}

pub async fn update_message(
    State(state): State<AppState>,
    Extension(CurrentUser(editor_id)): Extension<CurrentUser>,
    Path(message_id): Path<String>,
    Json(body): Json<UpdateMessageRequest>,
) -> Result<StatusCode, AppError> {
    MessageService::edit(
        state.store.as_ref(),
        &state.notifier,
        &message_id,
        &editor_id,
        &body.receiver_id,
        &body.content,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageRequest {
    pub receiver_id: String,
}

pub async fn delete_message(
    State(state): State<AppState>,
    Extension(CurrentUser(requester_id)): Extension<CurrentUser>,
    Path(message_id): Path<String>,
    Json(body): Json<DeleteMessageRequest>,
) -> Result<StatusCode, AppError> {
    MessageService::delete(
        state.store.as_ref(),
        &state.notifier,
        &message_id,
        &requester_id,
        &body.receiver_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
