//! Message repository for database operations.
//!
//! Messages are append-only. The single mutation is the receiver's false→true
//! read flip, guarded by `is_read = FALSE` so it can never run backwards.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MessageEntity, UnreadSummaryEntity};
use crate::metrics::QueryTimer;

const MESSAGE_COLUMNS: &str = "id, event_id, match_id, sender_session_id, receiver_session_id, \
                               content, is_read, created_at";

/// Repository for message-related database operations.
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Creates a new MessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a message to a conversation, unread for the receiver.
    pub async fn create_message(
        &self,
        event_id: Uuid,
        match_id: &str,
        sender_session_id: &str,
        receiver_session_id: &str,
        content: &str,
    ) -> Result<MessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_message");
        let result = sqlx::query_as::<_, MessageEntity>(&format!(
            r#"
            INSERT INTO messages (event_id, match_id, sender_session_id, receiver_session_id, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(event_id)
        .bind(match_id)
        .bind(sender_session_id)
        .bind(receiver_session_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Full conversation for a match, oldest first.
    pub async fn list_conversation(
        &self,
        event_id: Uuid,
        match_id: &str,
    ) -> Result<Vec<MessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_conversation");
        let result = sqlx::query_as::<_, MessageEntity>(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE event_id = $1 AND match_id = $2
            ORDER BY created_at ASC
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(event_id)
        .bind(match_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark every unread message addressed to the receiver in this match as
    /// read. Returns the number of rows flipped; a second call is a no-op.
    pub async fn mark_conversation_read(
        &self,
        event_id: Uuid,
        match_id: &str,
        receiver_session_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_conversation_read");
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE event_id = $1
              AND match_id = $2
              AND receiver_session_id = $3
              AND is_read = FALSE
            "#,
        )
        .bind(event_id)
        .bind(match_id)
        .bind(receiver_session_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// The receiver's unread state: most recent unread message plus the total
    /// unread count, in one row. None when nothing is unread.
    pub async fn unread_summary(
        &self,
        event_id: Uuid,
        receiver_session_id: &str,
    ) -> Result<Option<UnreadSummaryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("unread_summary");
        let result = sqlx::query_as::<_, UnreadSummaryEntity>(
            r#"
            SELECT id, sender_session_id, created_at,
                   (SELECT COUNT(*) FROM messages
                     WHERE event_id = $1 AND receiver_session_id = $2 AND is_read = FALSE
                   ) AS unread_count
            FROM messages
            WHERE event_id = $1 AND receiver_session_id = $2 AND is_read = FALSE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(event_id)
        .bind(receiver_session_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

}
