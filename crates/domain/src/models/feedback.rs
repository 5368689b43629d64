//! Post-event feedback domain models.
//!
//! Feedback is collected after an event expires, one submission per
//! (event, session). It survives the attendee-record purge so organizers can
//! read it later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A feedback survey submission for an ended event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventFeedback {
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

/// Request to submit event feedback.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitFeedbackRequest {
    pub event_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating_profile_setup: i32,

    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating_interests_helpful: i32,

    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating_social_usefulness: i32,

    pub met_match_in_person: bool,
    pub open_to_other_event_types: bool,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "match_experience_feedback must be between 1 and 2000 characters"
    ))]
    pub match_experience_feedback: String,

    #[validate(length(max = 2000, message = "general_feedback must be at most 2000 characters"))]
    pub general_feedback: Option<String>,
}
