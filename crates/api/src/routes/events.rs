//! Event routes: the attendee join flow and the organizer management surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::event::{
    generate_event_code, is_valid_event_code, CreateEventRequest, Event, JoinEventRequest,
    JoinEventResponse, UpdateEventRequest,
};
use persistence::repositories::{EventRepository, ProfileRepository};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{OptionalSessionId, SessionContext};

/// Join an event by access code.
///
/// POST /api/v1/events/join
///
/// The attendee entry point. Distinguishes unknown, not-yet-started, and
/// ended events so the client can show the right screen. When the caller
/// already carries a session id, reports whether a profile exists for the
/// resume path.
pub async fn join_event(
    State(state): State<AppState>,
    session: OptionalSessionId,
    Json(request): Json<JoinEventRequest>,
) -> Result<Json<JoinEventResponse>, ApiError> {
    request.validate()?;

    let code = request.code.trim().to_uppercase();
    if !is_valid_event_code(&code) {
        return Err(ApiError::Validation(
            "code must be 4-12 uppercase letters or digits".to_string(),
        ));
    }

    let event_repo = EventRepository::new(state.pool.clone());
    let event: Event = event_repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid event code".to_string()))?
        .into();

    let now = Utc::now();
    if now < event.starts_at {
        return Err(ApiError::EventNotStarted(
            "This event hasn't started yet. Try again soon!".to_string(),
        ));
    }
    if event.has_ended_at(now) {
        return Err(ApiError::EventEnded("This event has ended".to_string()));
    }

    let profile_exists = match &session.0 {
        Some(session_id) => {
            let profile_repo = ProfileRepository::new(state.pool.clone());
            profile_repo.exists(event.id, session_id).await?
        }
        None => false,
    };

    info!(
        event_id = %event.id,
        code = %code,
        profile_exists = profile_exists,
        "Attendee joined event"
    );

    Ok(Json(JoinEventResponse {
        event,
        profile_exists,
    }))
}

/// Current session status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionStatusResponse {
    pub event: Event,
    pub profile_exists: bool,
}

/// Check the caller's stored session against the live event state.
///
/// GET /api/v1/session
///
/// Returns 410 `event_ended` once the event expires, which clients treat as
/// "clear stored keys and go home".
pub async fn session_status(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let event = super::require_active_event(&event_repo, ctx.event_id).await?;

    let profile_repo = ProfileRepository::new(state.pool.clone());
    let profile_exists = profile_repo.exists(ctx.event_id, &ctx.session_id).await?;

    Ok(Json(SessionStatusResponse {
        event,
        profile_exists,
    }))
}

/// Create a new event.
///
/// POST /api/v1/admin/events
///
/// Requires the organizer key. Generates an access code when none is given.
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    request.validate()?;
    request
        .validate_schedule()
        .map_err(ApiError::Validation)?;

    let event_repo = EventRepository::new(state.pool.clone());

    let code = match &request.code {
        Some(code) => code.trim().to_uppercase(),
        None => event_repo.generate_unique_code(generate_event_code).await?,
    };

    let event = event_repo
        .create_event(
            &code,
            &request.name,
            &request.location,
            request.description.as_deref(),
            request.starts_at,
            request.expires_at,
        )
        .await?;

    info!(
        event_id = %event.id,
        code = %event.code,
        name = %event.name,
        "Event created"
    );

    Ok((StatusCode::CREATED, Json(event.into())))
}

/// List all events, newest first.
///
/// GET /api/v1/admin/events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let events = event_repo.list_events().await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// Update an event.
///
/// PUT /api/v1/admin/events/:event_id
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    request.validate()?;

    let event_repo = EventRepository::new(state.pool.clone());

    // Validate the merged schedule before writing.
    let current = event_repo
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
    let starts_at = request.starts_at.unwrap_or(current.starts_at);
    let expires_at = request.expires_at.unwrap_or(current.expires_at);
    if expires_at <= starts_at {
        return Err(ApiError::Validation(
            "expires_at must be after starts_at".to_string(),
        ));
    }

    let event = event_repo
        .update_event(
            event_id,
            request.name.as_deref(),
            request.location.as_deref(),
            request.description.as_deref(),
            request.starts_at,
            request.expires_at,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    info!(event_id = %event.id, "Event updated");

    Ok(Json(event.into()))
}

/// Delete an event and everything that hangs off it.
///
/// DELETE /api/v1/admin/events/:event_id
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let deleted = event_repo.delete_event(event_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    info!(event_id = %event_id, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}
