//! Like entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Like;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the likes table.
#[derive(Debug, Clone, FromRow)]
pub struct LikeEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub liker_session_id: String,
    pub liked_session_id: String,
    pub is_mutual: bool,
    pub liker_notified_of_match: bool,
    pub liked_notified_of_match: bool,
    pub created_at: DateTime<Utc>,
}

impl LikeEntity {
    /// The other party's session id, from the given session's point of view.
    pub fn other_session<'a>(&'a self, session_id: &str) -> &'a str {
        if self.liker_session_id == session_id {
            &self.liked_session_id
        } else {
            &self.liker_session_id
        }
    }

}

impl From<LikeEntity> for Like {
    fn from(entity: LikeEntity) -> Self {
        Like {
            id: entity.id,
            event_id: entity.event_id,
            liker_session_id: entity.liker_session_id,
            liked_session_id: entity.liked_session_id,
            is_mutual: entity.is_mutual,
            liker_notified_of_match: entity.liker_notified_of_match,
            liked_notified_of_match: entity.liked_notified_of_match,
            created_at: entity.created_at,
        }
    }
}
