//! Message domain models for matched-pair chat.
//!
//! Messages are an append-only log per conversation. The only field that ever
//! changes is `is_read`, flipped false to true by the receiver, never back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A chat message between two matched sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Message {
    pub id: Uuid,
    pub event_id: Uuid,
    pub match_id: String,
    pub sender_session_id: String,
    pub receiver_session_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to send a message to a matched attendee.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 64, message = "receiver_session_id is required"))]
    pub receiver_session_id: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "content must be between 1 and 2000 characters"
    ))]
    pub content: String,
}

/// Request to mark a conversation read.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct MarkReadRequest {
    /// The other party's session id.
    #[validate(length(min = 1, max = 64, message = "with is required"))]
    pub with: String,
}

/// Response after marking a conversation read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MarkReadResponse {
    pub marked_read: u64,
}

/// A full conversation, oldest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConversationResponse {
    pub match_id: String,
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_request_validation() {
        let valid = SendMessageRequest {
            receiver_session_id: "s_0j3kfm2l9qpx7c4nvb81wzty".to_string(),
            content: "hey! loved your playlist picks".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_content = SendMessageRequest {
            content: String::new(),
            ..valid.clone()
        };
        assert!(empty_content.validate().is_err());

        let oversized = SendMessageRequest {
            content: "x".repeat(2001),
            ..valid
        };
        assert!(oversized.validate().is_err());
    }

    #[test]
    fn test_mark_read_request_validation() {
        assert!(MarkReadRequest {
            with: "s_abc".to_string()
        }
        .validate()
        .is_ok());
        assert!(MarkReadRequest { with: String::new() }.validate().is_err());
    }
}
