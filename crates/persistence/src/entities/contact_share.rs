//! Contact share entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::contact_share::ContactShare;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the contact_shares table.
#[derive(Debug, Clone, FromRow)]
pub struct ContactShareEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub match_id: String,
    pub sharer_session_id: String,
    pub recipient_session_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactShareEntity> for ContactShare {
    fn from(entity: ContactShareEntity) -> Self {
        ContactShare {
            id: entity.id,
            event_id: entity.event_id,
            match_id: entity.match_id,
            sharer_session_id: entity.sharer_session_id,
            recipient_session_id: entity.recipient_session_id,
            full_name: entity.full_name,
            phone_number: entity.phone_number,
            created_at: entity.created_at,
        }
    }
}
