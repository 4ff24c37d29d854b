//! Message-lifecycle events published on the pair channel.
//!
//! Every event is one JSON envelope: `{"event": "<name>", "data": {...}}`.
//! The payload carries only what a subscriber needs to patch its local
//! view; anything missed is recovered by re-fetching history, since the
//! store stays authoritative.

use crate::models::MessageType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ChatEvent {
    /// New message sent
    #[serde(rename = "message.created", rename_all = "camelCase")]
    MessageCreated {
        sender_id: String,
        content: String,
        timestamp: i64,
        message_type: MessageType,
    },

    /// Message content edited (ordering is unchanged, so no timestamp)
    #[serde(rename = "message.edited", rename_all = "camelCase")]
    MessageEdited { message_id: String, content: String },

    /// Message removed entirely
    #[serde(rename = "message.deleted", rename_all = "camelCase")]
    MessageDeleted { message_id: String },
}

impl ChatEvent {
    /// Event name as it appears on the wire.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageCreated { .. } => "message.created",
            Self::MessageEdited { .. } => "message.edited",
            Self::MessageDeleted { .. } => "message.deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_event_envelope_shape() {
        let event = ChatEvent::MessageCreated {
            sender_id: "u1".into(),
            content: "hi".into(),
            timestamp: 1700000000123,
            message_type: MessageType::Text,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "message.created");
        assert_eq!(json["data"]["senderId"], "u1");
        assert_eq!(json["data"]["messageType"], "text");
        assert_eq!(json["data"]["timestamp"], 1700000000123i64);
    }

    #[test]
    fn edited_and_deleted_carry_only_what_subscribers_need() {
        let edited = ChatEvent::MessageEdited {
            message_id: "message:1:abcdefg".into(),
            content: "hi there".into(),
        };
        let json = serde_json::to_value(&edited).unwrap();
        assert_eq!(json["event"], "message.edited");
        assert_eq!(json["data"]["messageId"], "message:1:abcdefg");

        let deleted = ChatEvent::MessageDeleted {
            message_id: "message:1:abcdefg".into(),
        };
        let json = serde_json::to_value(&deleted).unwrap();
        assert_eq!(json["event"], "message.deleted");
        assert_eq!(json["data"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn envelope_round_trips() {
        let event = ChatEvent::MessageDeleted {
            message_id: "message:1:abcdefg".into(),
        };
        let wire = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&wire).unwrap();
        assert_eq!(back.event_type(), "message.deleted");
    }
}
