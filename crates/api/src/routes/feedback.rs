//! Post-event feedback route.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use domain::models::feedback::{EventFeedback, SubmitFeedbackRequest};
use domain::models::Event;
use persistence::repositories::feedback::NewFeedback;
use persistence::repositories::{EventRepository, FeedbackRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalSessionId;

/// Submit the post-event survey.
///
/// POST /api/v1/feedback
///
/// Reachable after the event has expired, which is why the event id travels
/// in the body rather than the session headers. One submission per
/// (event, session); a repeat returns 409.
pub async fn submit_feedback(
    State(state): State<AppState>,
    session: OptionalSessionId,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<EventFeedback>), ApiError> {
    request.validate()?;

    let session_id = session.0.ok_or_else(|| {
        ApiError::Unauthorized("Missing X-Session-Id header".to_string())
    })?;

    let event_repo = EventRepository::new(state.pool.clone());
    let event: Event = event_repo
        .find_by_id(request.event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    if !event.has_ended_at(Utc::now()) {
        return Err(ApiError::EventNotEnded(
            "Feedback opens once the event has ended".to_string(),
        ));
    }

    let feedback_repo = FeedbackRepository::new(state.pool.clone());
    let feedback = feedback_repo
        .create_feedback(NewFeedback {
            event_id: request.event_id,
            session_id: &session_id,
            rating_profile_setup: request.rating_profile_setup,
            rating_interests_helpful: request.rating_interests_helpful,
            rating_social_usefulness: request.rating_social_usefulness,
            met_match_in_person: request.met_match_in_person,
            open_to_other_event_types: request.open_to_other_event_types,
            match_experience_feedback: &request.match_experience_feedback,
            general_feedback: request.general_feedback.as_deref(),
        })
        .await?;

    info!(
        event_id = %request.event_id,
        session_id = %session_id,
        "Feedback submitted"
    );

    Ok((StatusCode::CREATED, Json(feedback.into())))
}
