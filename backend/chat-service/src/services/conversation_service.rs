use crate::error::AppResult;
use crate::models::Conversation;
use crate::store::{keys, StoreBackend};
use tracing::info;

pub struct ConversationService;

impl ConversationService {
    /// Ensure the conversation for a pair exists, creating it lazily on
    /// first contact.
    ///
    /// Runs on every send; "already exists" is the steady state, not an
    /// error. On creation the conversation id is also added to both
    /// participants' conversation sets.
    pub async fn ensure_conversation(
        store: &dyn StoreBackend,
        sender_id: &str,
        receiver_id: &str,
    ) -> AppResult<String> {
        let conversation_id = keys::conversation_key(sender_id, receiver_id);

        if store.exists(&conversation_id).await? {
            return Ok(conversation_id);
        }

        let conversation = Conversation::new(sender_id, receiver_id);
        store
            .hash_write(&conversation_id, &conversation.to_fields())
            .await?;
        store
            .set_add(&keys::user_conversations_key(sender_id), &conversation_id)
            .await?;
        store
            .set_add(&keys::user_conversations_key(receiver_id), &conversation_id)
            .await?;
        info!(%conversation_id, "conversation created");

        Ok(conversation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    #[tokio::test]
    async fn creation_is_idempotent() {
        let store = MemoryBackend::new();
        let first = ConversationService::ensure_conversation(&store, "u2", "u1")
            .await
            .unwrap();
        let second = ConversationService::ensure_conversation(&store, "u1", "u2")
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "conversation:u1:u2");
    }
}
