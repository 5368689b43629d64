//! Notification poll route.
//!
//! One endpoint carrying the per-tick logic every screen used to duplicate:
//! a match check and a message check, independent of each other, at most one
//! payload of each kind per call.

use axum::{extract::State, Json};
use domain::services::notification::{
    MatchNotification, MessageNotification, NotificationsResponse,
};
use persistence::repositories::{EventRepository, LikeRepository, MessageRepository, ProfileRepository};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;

/// Poll for pending notifications.
///
/// GET /api/v1/notifications
///
/// Match check: the first mutual like the caller has not been shown yet.
/// Returning it marks the caller's own notified flag as a side effect, so a
/// match is surfaced once per party. Message check: the most recent unread
/// message, named by sender; nothing is marked read (that happens on chat
/// view). A poll may surface zero, one, or two payloads.
pub async fn poll_notifications(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let like_repo = LikeRepository::new(state.pool.clone());
    let profile_repo = ProfileRepository::new(state.pool.clone());
    let message_repo = MessageRepository::new(state.pool.clone());

    // Match check.
    let mut new_match = None;
    if let Some(like) = like_repo
        .find_unnotified_mutual(ctx.event_id, &ctx.session_id)
        .await?
    {
        let other_session = like.other_session(&ctx.session_id).to_string();
        if let Some(profile) = profile_repo
            .find_by_session(ctx.event_id, &other_session)
            .await?
        {
            // Marking is a side effect of displaying; already-true is a no-op.
            like_repo.mark_notified(like.id, &ctx.session_id).await?;

            info!(
                event_id = %ctx.event_id,
                session_id = %ctx.session_id,
                like_id = %like.id,
                "Match notification surfaced"
            );

            new_match = Some(MatchNotification {
                like_id: like.id,
                matched_profile: profile.into(),
            });
        }
    }

    // Message check, independent of the match check.
    let mut new_message = None;
    if let Some(summary) = message_repo
        .unread_summary(ctx.event_id, &ctx.session_id)
        .await?
    {
        if let Some(sender) = profile_repo
            .find_by_session(ctx.event_id, &summary.sender_session_id)
            .await?
        {
            new_message = Some(MessageNotification {
                message_id: summary.id,
                sender_session_id: summary.sender_session_id,
                sender_first_name: sender.first_name,
                sent_at: summary.created_at,
                unread_count: summary.unread_count,
            });
        }
    }

    // Badge state. Matches: recomputed after the side-effect mark above, so
    // the dot clears once everything has been surfaced.
    let has_unseen_matches = like_repo
        .has_unnotified_mutual(ctx.event_id, &ctx.session_id)
        .await?;
    let has_unread_messages = new_message.is_some();

    Ok(Json(NotificationsResponse {
        new_match,
        new_message,
        has_unseen_matches,
        has_unread_messages,
    }))
}
