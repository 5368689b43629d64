//! Event feedback entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::feedback::EventFeedback;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the event_feedback table.
#[derive(Debug, Clone, FromRow)]
pub struct EventFeedbackEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub session_id: String,
    pub rating_profile_setup: i32,
    pub rating_interests_helpful: i32,
    pub rating_social_usefulness: i32,
    pub met_match_in_person: bool,
    pub open_to_other_event_types: bool,
    pub match_experience_feedback: String,
    pub general_feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventFeedbackEntity> for EventFeedback {
    fn from(entity: EventFeedbackEntity) -> Self {
        EventFeedback {
            id: entity.id,
            event_id: entity.event_id,
            session_id: entity.session_id,
            rating_profile_setup: entity.rating_profile_setup,
            rating_interests_helpful: entity.rating_interests_helpful,
            rating_social_usefulness: entity.rating_social_usefulness,
            met_match_in_person: entity.met_match_in_person,
            open_to_other_event_types: entity.open_to_other_event_types,
            match_experience_feedback: entity.match_experience_feedback,
            general_feedback: entity.general_feedback,
            created_at: entity.created_at,
        }
    }
}
