use serde::{Deserialize, Serialize};

/// Unified API error response format (all services use this shape).
///
/// Routes never hand back a bare string: every failure is rendered as one
/// of these so clients can branch on `code` without parsing messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short human-readable title ("Forbidden", "Not Found", ...)
    pub error: String,
    /// Full human-readable message for logs and debugging
    pub message: String,
    /// HTTP status code
    pub status: u16,
    /// Error category ("authorization_error", "not_found_error", ...)
    pub error_type: String,
    /// Stable machine-readable code from [`error_codes`]
    pub code: String,
    /// Optional structured details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// RFC 3339 timestamp of when the error was produced
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, error_type: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            error_type: error_type.to_string(),
            code: code.to_string(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Stable machine-readable error codes shared across services.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const NOT_MESSAGE_SENDER: &str = "NOT_MESSAGE_SENDER";
    pub const MESSAGE_NOT_FOUND: &str = "MESSAGE_NOT_FOUND";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_empty_details() {
        let resp = ErrorResponse::new(
            "Forbidden",
            "only the sender may edit a message",
            403,
            "authorization_error",
            error_codes::NOT_MESSAGE_SENDER,
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], 403);
        assert_eq!(json["code"], "NOT_MESSAGE_SENDER");
        assert!(json.get("details").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn round_trips_with_details() {
        let resp = ErrorResponse::new("Bad Request", "content empty", 400, "validation_error", error_codes::INVALID_REQUEST)
            .with_details(serde_json::json!({"field": "content"}));
        let back: ErrorResponse = serde_json::from_str(&serde_json::to_string(&resp).unwrap()).unwrap();
        assert_eq!(back.details.unwrap()["field"], "content");
    }
}
