//! HTTP route handlers.

pub mod contact_shares;
pub mod events;
pub mod feedback;
pub mod health;
pub mod likes;
pub mod matches;
pub mod messages;
pub mod notifications;
pub mod profiles;

use chrono::Utc;
use domain::models::Event;
use persistence::repositories::EventRepository;
use uuid::Uuid;

use crate::error::ApiError;

/// Resolve an event and require it to be currently active.
///
/// Looked up fresh on every request (no caching). An expired event maps to
/// 410 `event_ended`, the signal for clients to clear their stored session
/// keys and return to the join flow.
pub(crate) async fn require_active_event(
    events: &EventRepository,
    event_id: Uuid,
) -> Result<Event, ApiError> {
    let event: Event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    let now = Utc::now();
    if now < event.starts_at {
        return Err(ApiError::EventNotStarted(
            "This event hasn't started yet".to_string(),
        ));
    }
    if event.has_ended_at(now) {
        return Err(ApiError::EventEnded("This event has ended".to_string()));
    }

    Ok(event)
}
