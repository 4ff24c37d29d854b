use crate::store::StoreError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Charset of `Number.toString(36)`: the id suffix alphabet shared with
/// pre-existing message keys.
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(MessageType::Text),
            "image" => Some(MessageType::Image),
            _ => None,
        }
    }
}

/// A message record, keyed `message:{timestamp}:{random}`.
///
/// The id embeds the creation timestamp plus a random disambiguator, so it
/// both names the record hash and breaks ordering ties deterministically.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub content: String,
    /// Creation time, integer epoch milliseconds.
    pub timestamp: i64,
    pub message_type: MessageType,
}

/// Mint a new message id for the given creation timestamp.
pub fn new_message_id(timestamp: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("message:{timestamp}:{suffix}")
}

impl Message {
    /// Validate a raw hash into a typed record.
    ///
    /// The caller decides what an empty map means (missing key); this
    /// rejects maps that are present but incomplete or malformed.
    pub fn from_hash(id: &str, fields: &HashMap<String, String>) -> Result<Self, StoreError> {
        let malformed = |reason: &str| StoreError::MalformedRecord {
            key: id.to_string(),
            reason: reason.to_string(),
        };

        let sender_id = fields
            .get("senderId")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| malformed("missing senderId"))?;
        let content = fields
            .get("content")
            .ok_or_else(|| malformed("missing content"))?;
        let timestamp = fields
            .get("timestamp")
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| malformed("missing or non-numeric timestamp"))?;
        let message_type = fields
            .get("messageType")
            .and_then(|v| MessageType::parse(v))
            .ok_or_else(|| malformed("missing or unknown messageType"))?;

        Ok(Self {
            id: id.to_string(),
            sender_id: sender_id.clone(),
            content: content.clone(),
            timestamp,
            message_type,
        })
    }

    /// Field layout written to the record hash.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("senderId".into(), self.sender_id.clone()),
            ("content".into(), self.content.clone()),
            ("timestamp".into(), self.timestamp.to_string()),
            ("messageType".into(), self.message_type.as_str().into()),
        ]
    }
}
