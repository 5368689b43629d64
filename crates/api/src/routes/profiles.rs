//! Profile routes: creation, discovery browsing, and self-management.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use domain::models::profile::{
    pick_profile_color, CreateProfileRequest, CreateProfileResponse, EventProfile,
    UpdateProfileRequest,
};
use domain::services::discovery::{filter_candidates, DiscoveryFilters};
use persistence::repositories::{EventRepository, NewProfile, ProfileRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{EventOnlyContext, SessionContext};
use crate::middleware::metrics::record_profile_created;

/// Create the caller's profile and issue their session id.
///
/// POST /api/v1/profiles
///
/// The one endpoint that needs an event id but no session yet: the session
/// identity is born here, returned to the client to persist locally.
pub async fn create_profile(
    State(state): State<AppState>,
    ctx: EventOnlyContext,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<CreateProfileResponse>), ApiError> {
    request.validate()?;

    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let session_id = shared::ids::generate_session_id();
    let profile_color = request
        .profile_color
        .clone()
        .unwrap_or_else(pick_profile_color);

    let profile_repo = ProfileRepository::new(state.pool.clone());
    let profile = profile_repo
        .create_profile(NewProfile {
            event_id: ctx.event_id,
            session_id: &session_id,
            first_name: &request.first_name,
            age: request.age,
            gender_identity: request.gender_identity.into(),
            interested_in: request.interested_in.into(),
            interests: &request.interests,
            profile_photo_url: request.profile_photo_url.as_deref(),
            profile_color: &profile_color,
            bio: request.bio.as_deref(),
            height: request.height.as_deref(),
        })
        .await?;

    record_profile_created();
    info!(
        event_id = %ctx.event_id,
        session_id = %session_id,
        "Profile created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateProfileResponse {
            session_id,
            profile: profile.into(),
        }),
    ))
}

/// Browse visible attendees.
///
/// GET /api/v1/profiles
///
/// Returns visible profiles in the event excluding the caller, filtered by
/// mutual gender-interest compatibility and the caller's optional filters.
pub async fn discover_profiles(
    State(state): State<AppState>,
    ctx: SessionContext,
    Query(filters): Query<DiscoveryFilters>,
) -> Result<Json<Vec<EventProfile>>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let profile_repo = ProfileRepository::new(state.pool.clone());
    let viewer: EventProfile = profile_repo
        .find_by_session(ctx.event_id, &ctx.session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Your profile for this event was not found".to_string()))?
        .into();

    let candidates: Vec<EventProfile> = profile_repo
        .find_visible_in_event(ctx.event_id, &ctx.session_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(filter_candidates(&viewer, candidates, &filters)))
}

/// Fetch the caller's own profile.
///
/// GET /api/v1/profiles/me
pub async fn get_own_profile(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<Json<EventProfile>, ApiError> {
    let profile_repo = ProfileRepository::new(state.pool.clone());
    let profile = profile_repo
        .find_by_session(ctx.event_id, &ctx.session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Your profile for this event was not found".to_string()))?;

    Ok(Json(profile.into()))
}

/// Update the caller's own profile (bio, interests, visibility toggle).
///
/// PUT /api/v1/profiles/me
pub async fn update_own_profile(
    State(state): State<AppState>,
    ctx: SessionContext,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<EventProfile>, ApiError> {
    request.validate()?;

    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let profile_repo = ProfileRepository::new(state.pool.clone());
    let profile = profile_repo
        .update_profile(
            ctx.event_id,
            &ctx.session_id,
            request.first_name.as_deref(),
            request.interests.as_deref(),
            request.profile_photo_url.as_deref(),
            request.bio.as_deref(),
            request.height.as_deref(),
            request.is_visible,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Your profile for this event was not found".to_string()))?;

    info!(
        event_id = %ctx.event_id,
        session_id = %ctx.session_id,
        is_visible = profile.is_visible,
        "Profile updated"
    );

    Ok(Json(profile.into()))
}

/// Leave the event: delete the caller's profile.
///
/// DELETE /api/v1/profiles/me
///
/// Likes and messages are left behind; they age out with the event purge.
pub async fn leave_event(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<StatusCode, ApiError> {
    let profile_repo = ProfileRepository::new(state.pool.clone());
    let deleted = profile_repo
        .delete_by_session(ctx.event_id, &ctx.session_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound(
            "Your profile for this event was not found".to_string(),
        ));
    }

    info!(
        event_id = %ctx.event_id,
        session_id = %ctx.session_id,
        "Attendee left event"
    );

    Ok(StatusCode::NO_CONTENT)
}
