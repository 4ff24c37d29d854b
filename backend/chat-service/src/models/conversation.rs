use crate::store::keys;
use serde::{Deserialize, Serialize};

/// A conversation record, keyed by the canonical pair key.
///
/// Created exactly once on first contact, never mutated, never deleted.
/// `participant1`/`participant2` keep creation order only because that is
/// how pre-existing records were written; no meaning attaches to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participant1: String,
    pub participant2: String,
}

impl Conversation {
    pub fn new(sender_id: &str, receiver_id: &str) -> Self {
        Self {
            id: keys::conversation_key(sender_id, receiver_id),
            participant1: sender_id.to_string(),
            participant2: receiver_id.to_string(),
        }
    }

    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("participant1".into(), self.participant1.clone()),
            ("participant2".into(), self.participant2.clone()),
        ]
    }
}
