use crate::error::AppError;
use crate::state::AppState;
use crate::websocket::pubsub::channel_for_pair;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::debug;

/// Identity arrives via query parameters: browser WebSocket clients cannot
/// set headers on the upgrade request, and the gateway validates the user
/// before the request reaches this service.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub user_id: String,
    /// The other participant of the pair to subscribe to.
    pub with: String,
}

pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    if params.user_id.trim().is_empty() {
        return Err(AppError::Unauthorized);
    }
    if params.with.trim().is_empty() {
        return Err(AppError::BadRequest("missing peer id".into()));
    }
    let channel = channel_for_pair(&params.user_id, &params.with);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, channel)))
}

async fn handle_socket(socket: WebSocket, state: AppState, channel: String) {
    let mut broadcasts = state.registry.add_subscriber(&channel).await;
    let (mut sink, mut incoming) = socket.split();
    debug!(%channel, "websocket subscriber attached");

    loop {
        tokio::select! {
            broadcast = broadcasts.recv() => match broadcast {
                Some(msg) => {
                    if sink.send(msg).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            frame = incoming.next() => match frame {
                // subscribers only listen; inbound frames carry nothing here
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    debug!(%channel, "websocket subscriber detached");
}
