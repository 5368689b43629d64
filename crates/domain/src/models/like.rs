//! Like domain models.
//!
//! A like is a one-directional expression of interest from one session to
//! another within an event. `is_mutual` is established lazily by whichever
//! side likes second; the two `*_notified_of_match` flags are each owned by
//! the respective party and flip true when that party is shown the match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::profile::EventProfile;

/// A one-directional like between two sessions in an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Like {
    pub id: Uuid,
    pub event_id: Uuid,
    pub liker_session_id: String,
    pub liked_session_id: String,
    pub is_mutual: bool,
    pub liker_notified_of_match: bool,
    pub liked_notified_of_match: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to like another attendee.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LikeRequest {
    #[validate(length(min = 1, max = 64, message = "liked_session_id is required"))]
    pub liked_session_id: String,
}

/// Outcome of a like: whether the reciprocal like already existed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LikeResponse {
    pub mutual: bool,
    /// The other party's profile when the like completed a match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_profile: Option<EventProfile>,
}

/// The caller's outgoing like set (the client-side dedup guard).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LikedSessionsResponse {
    pub liked_session_ids: Vec<String>,
}
