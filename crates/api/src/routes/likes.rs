//! Like routes: the mutual-match reconciliation engine.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::like::{LikeRequest, LikeResponse, LikedSessionsResponse};
use persistence::repositories::{EventRepository, LikeRepository, ProfileRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;
use crate::middleware::metrics::record_like_created;

/// Like another attendee; detect and confirm a mutual match.
///
/// POST /api/v1/likes
///
/// Creates the like, then checks for the reciprocal record. Whichever side
/// likes second flips both records to mutual, in one transaction: its own
/// record gains `liker_notified_of_match` (that user is seeing the match
/// right now), the earlier record gains `liked_notified_of_match`. The first
/// liker learns about the match from its next notification poll.
pub async fn create_like(
    State(state): State<AppState>,
    ctx: SessionContext,
    Json(request): Json<LikeRequest>,
) -> Result<(StatusCode, Json<LikeResponse>), ApiError> {
    request.validate()?;

    if request.liked_session_id == ctx.session_id {
        return Err(ApiError::Validation("You cannot like yourself".to_string()));
    }

    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let profile_repo = ProfileRepository::new(state.pool.clone());
    profile_repo
        .find_by_session(ctx.event_id, &ctx.session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Your profile for this event was not found".to_string()))?;
    let liked_profile = profile_repo
        .find_by_session(ctx.event_id, &request.liked_session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Liked profile not found".to_string()))?;

    let like_repo = LikeRepository::new(state.pool.clone());

    // The (event, liker, liked) unique key turns a duplicate like into a 409
    // instead of a second record.
    let own_like = like_repo
        .create_like(ctx.event_id, &ctx.session_id, &request.liked_session_id)
        .await?;

    let reciprocal = like_repo
        .find_reciprocal(ctx.event_id, &ctx.session_id, &request.liked_session_id)
        .await?;

    let mutual = if let Some(reciprocal) = reciprocal {
        like_repo
            .mark_pair_mutual(own_like.id, reciprocal.id)
            .await?;
        true
    } else {
        false
    };

    record_like_created(mutual);
    info!(
        event_id = %ctx.event_id,
        liker = %ctx.session_id,
        liked = %request.liked_session_id,
        mutual = mutual,
        "Like created"
    );

    Ok((
        StatusCode::CREATED,
        Json(LikeResponse {
            mutual,
            matched_profile: if mutual {
                Some(liked_profile.into())
            } else {
                None
            },
        }),
    ))
}

/// The caller's outgoing like targets.
///
/// GET /api/v1/likes
///
/// Serves the client-side dedup set so the UI can disable already-liked
/// cards before the server's unique key would reject a repeat.
pub async fn list_likes(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<Json<LikedSessionsResponse>, ApiError> {
    let like_repo = LikeRepository::new(state.pool.clone());
    let liked_session_ids = like_repo
        .liked_session_ids(ctx.event_id, &ctx.session_id)
        .await?;

    Ok(Json(LikedSessionsResponse { liked_session_ids }))
}
