//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Event;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Event {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            location: entity.location,
            description: entity.description,
            starts_at: entity.starts_at,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        }
    }
}
