//! Message entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Message;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the messages table.
#[derive(Debug, Clone, FromRow)]
pub struct MessageEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub match_id: String,
    pub sender_session_id: String,
    pub receiver_session_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageEntity> for Message {
    fn from(entity: MessageEntity) -> Self {
        Message {
            id: entity.id,
            event_id: entity.event_id,
            match_id: entity.match_id,
            sender_session_id: entity.sender_session_id,
            receiver_session_id: entity.receiver_session_id,
            content: entity.content,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }
}

/// The receiver's unread state in one row: the most recent unread message
/// plus the total unread count across all conversations.
#[derive(Debug, Clone, FromRow)]
pub struct UnreadSummaryEntity {
    pub id: Uuid,
    pub sender_session_id: String,
    pub created_at: DateTime<Utc>,
    pub unread_count: i64,
}
