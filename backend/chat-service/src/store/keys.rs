//! Builders for the stable key schema.
//!
//! These shapes are shared with pre-existing data; changing any of them
//! orphans every record written so far.

/// Canonical, order-independent key for a pair of participants.
///
/// The two ids are sorted lexicographically before joining, so
/// `conversation_key(a, b) == conversation_key(b, a)` for all inputs.
pub fn conversation_key(user_a: &str, user_b: &str) -> String {
    let mut pair = [user_a, user_b];
    pair.sort_unstable();
    format!("conversation:{}:{}", pair[0], pair[1])
}

/// Sorted-set index of a conversation's message ids, scored by timestamp.
pub fn messages_index_key(conversation_id: &str) -> String {
    format!("{conversation_id}:messages")
}

/// Profile hash of a user.
pub fn user_key(user_id: &str) -> String {
    format!("user:{user_id}")
}

/// Set of conversation ids a user participates in.
pub fn user_conversations_key(user_id: &str) -> String {
    format!("user:{user_id}:conversations")
}
