//! Matches listing route.

use axum::{extract::State, Json};
use domain::models::profile::EventProfile;
use persistence::repositories::{EventRepository, ProfileRepository};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;

/// One mutual match with its conversation's unread count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchSummary {
    pub profile: EventProfile,
    pub unread_count: i64,
}

/// Response for the matches listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMatchesResponse {
    pub matches: Vec<MatchSummary>,
}

/// List the caller's mutual matches.
///
/// GET /api/v1/matches
///
/// Each entry is the other party's profile plus the number of unread
/// messages they have sent the caller. Match-notified flags are untouched
/// here; the notification poll owns them.
pub async fn list_matches(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<Json<ListMatchesResponse>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let profile_repo = ProfileRepository::new(state.pool.clone());
    let matches = profile_repo
        .find_matched_profiles(ctx.event_id, &ctx.session_id)
        .await?
        .into_iter()
        .map(|m| MatchSummary {
            profile: m.profile.into(),
            unread_count: m.unread_count,
        })
        .collect();

    Ok(Json(ListMatchesResponse { matches }))
}
