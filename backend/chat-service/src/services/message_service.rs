use crate::error::{AppError, AppResult};
use crate::models::{message, Message, MessageType};
use crate::services::conversation_service::ConversationService;
use crate::store::{keys, StoreBackend};
use crate::websocket::{ChatEvent, Notifier};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    pub conversation_id: String,
    pub message_id: String,
}

/// Only the original sender may mutate a message.
pub fn assert_sender(message: &Message, requester_id: &str) -> AppResult<()> {
    if message.sender_id != requester_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

fn require_non_empty(value: &str, what: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Fetch a message record, mapping "no such key" to NotFound and anything
/// present-but-malformed to a store failure.
async fn fetch_message(store: &dyn StoreBackend, message_id: &str) -> AppResult<Message> {
    let fields = store.hash_read(message_id).await?;
    if fields.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Message::from_hash(message_id, &fields)?)
}

pub struct MessageService;

impl MessageService {
    /// Send a message: ensure the conversation, write the record, then
    /// index it. The index entry goes in only after the record write has
    /// succeeded, so a reader never resolves an index entry to nothing
    /// under normal operation.
    pub async fn send(
        store: &dyn StoreBackend,
        notifier: &Notifier,
        sender_id: &str,
        receiver_id: &str,
        content: &str,
        message_type: MessageType,
    ) -> AppResult<SendReceipt> {
        require_non_empty(sender_id, "sender id")?;
        require_non_empty(receiver_id, "receiver id")?;
        require_non_empty(content, "content")?;

        let conversation_id =
            ConversationService::ensure_conversation(store, sender_id, receiver_id).await?;

        let timestamp = chrono::Utc::now().timestamp_millis();
        let record = Message {
            id: message::new_message_id(timestamp),
            sender_id: sender_id.to_string(),
            content: content.to_string(),
            timestamp,
            message_type,
        };

        store.hash_write(&record.id, &record.to_fields()).await?;
        store
            .sorted_set_add(
                &keys::messages_index_key(&conversation_id),
                timestamp,
                &record.id,
            )
            .await?;

        notifier
            .notify(
                sender_id,
                receiver_id,
                ChatEvent::MessageCreated {
                    sender_id: record.sender_id.clone(),
                    content: record.content.clone(),
                    timestamp: record.timestamp,
                    message_type: record.message_type,
                },
            )
            .await;

        Ok(SendReceipt {
            conversation_id,
            message_id: record.id,
        })
    }

    /// Chronological history of a pair, oldest first.
    ///
    /// All record hashes are fetched in one pipelined round trip. An index
    /// entry whose record is already gone (the delete window) is skipped,
    /// not an error; a record that is present but malformed is.
    pub async fn history(
        store: &dyn StoreBackend,
        user_a: &str,
        user_b: &str,
    ) -> AppResult<Vec<Message>> {
        require_non_empty(user_a, "user id")?;
        require_non_empty(user_b, "user id")?;

        let conversation_id = keys::conversation_key(user_a, user_b);
        let message_ids = store
            .sorted_set_range(&keys::messages_index_key(&conversation_id))
            .await?;
        if message_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = store.hash_read_many(&message_ids).await?;
        let mut messages = Vec::with_capacity(rows.len());
        for (message_id, fields) in message_ids.iter().zip(rows.iter()) {
            if fields.is_empty() {
                debug!(%message_id, "skipping dangling index entry");
                continue;
            }
            messages.push(Message::from_hash(message_id, fields)?);
        }
        Ok(messages)
    }

    /// Edit a message's content in place. Timestamp, sender and type are
    /// untouched and the index is not re-sorted; an edit never reorders.
    pub async fn edit(
        store: &dyn StoreBackend,
        notifier: &Notifier,
        message_id: &str,
        editor_id: &str,
        receiver_id: &str,
        new_content: &str,
    ) -> AppResult<()> {
        require_non_empty(receiver_id, "receiver id")?;
        require_non_empty(new_content, "content")?;

        let record = fetch_message(store, message_id).await?;
        assert_sender(&record, editor_id)?;

        store
            .hash_write(message_id, &[("content".into(), new_content.to_string())])
            .await?;

        notifier
            .notify(
                editor_id,
                receiver_id,
                ChatEvent::MessageEdited {
                    message_id: message_id.to_string(),
                    content: new_content.to_string(),
                },
            )
            .await;

        Ok(())
    }

    /// Delete a message record and its index entry.
    ///
    /// The index entry is removed first so a concurrent reader never
    /// resolves an entry to a half-deleted record; the remaining window
    /// (record gone, entry briefly present) is handled by `history`
    /// skipping dangling entries.
    pub async fn delete(
        store: &dyn StoreBackend,
        notifier: &Notifier,
        message_id: &str,
        requester_id: &str,
        receiver_id: &str,
    ) -> AppResult<()> {
        require_non_empty(receiver_id, "receiver id")?;

        let record = fetch_message(store, message_id).await?;
        assert_sender(&record, requester_id)?;

        let conversation_id = keys::conversation_key(requester_id, receiver_id);
        store
            .sorted_set_remove(&keys::messages_index_key(&conversation_id), message_id)
            .await?;
        store.delete(message_id).await?;

        notifier
            .notify(
                requester_id,
                receiver_id,
                ChatEvent::MessageDeleted {
                    message_id: message_id.to_string(),
                },
            )
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_rejects_non_sender() {
        let msg = Message {
            id: "message:1:abcdefg".into(),
            sender_id: "u1".into(),
            content: "hi".into(),
            timestamp: 1,
            message_type: MessageType::Text,
        };
        assert!(matches!(assert_sender(&msg, "u2"), Err(AppError::Forbidden)));
        assert!(assert_sender(&msg, "u1").is_ok());
    }
}
