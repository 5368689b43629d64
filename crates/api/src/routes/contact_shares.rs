//! Contact share routes: the one-time card exchange inside a chat.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use domain::models::contact_share::{ContactShare, ContactShareStatus, ShareContactRequest};
use persistence::repositories::{ContactShareRepository, EventRepository, LikeRepository};
use serde::Deserialize;
use shared::ids::match_id;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;

/// Share the caller's contact card with a match.
///
/// POST /api/v1/contact-shares
///
/// Only valid inside a mutual match, and only once per side; a repeat hits
/// the (event, match, sharer) unique key and returns 409.
pub async fn share_contact(
    State(state): State<AppState>,
    ctx: SessionContext,
    Json(request): Json<ShareContactRequest>,
) -> Result<(StatusCode, Json<ContactShare>), ApiError> {
    request.validate()?;

    if request.recipient_session_id == ctx.session_id {
        return Err(ApiError::Validation(
            "You cannot share contact details with yourself".to_string(),
        ));
    }

    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let like_repo = LikeRepository::new(state.pool.clone());
    let is_mutual = like_repo
        .pair_is_mutual(ctx.event_id, &ctx.session_id, &request.recipient_session_id)
        .await?;
    if !is_mutual {
        return Err(ApiError::Forbidden(
            "Contact details can only be shared with a mutual match".to_string(),
        ));
    }

    let conversation_id = match_id(&ctx.session_id, &request.recipient_session_id);

    let share_repo = ContactShareRepository::new(state.pool.clone());
    let share = share_repo
        .create_share(
            ctx.event_id,
            &conversation_id,
            &ctx.session_id,
            &request.recipient_session_id,
            &request.full_name,
            &request.phone_number,
        )
        .await?;

    info!(
        event_id = %ctx.event_id,
        match_id = %conversation_id,
        sharer = %ctx.session_id,
        "Contact card shared"
    );

    Ok((StatusCode::CREATED, Json(share.into())))
}

/// Query parameters for contact-share status.
#[derive(Debug, Deserialize)]
pub struct ShareStatusQuery {
    /// The other party's session id.
    pub with: String,
}

/// Contact-share state of a conversation.
///
/// GET /api/v1/contact-shares?with={session_id}
///
/// Reports whether the caller has shared, and the other party's card when
/// they have shared it with the caller.
pub async fn share_status(
    State(state): State<AppState>,
    ctx: SessionContext,
    Query(query): Query<ShareStatusQuery>,
) -> Result<Json<ContactShareStatus>, ApiError> {
    if query.with.is_empty() {
        return Err(ApiError::Validation("with is required".to_string()));
    }

    let conversation_id = match_id(&ctx.session_id, &query.with);

    let share_repo = ContactShareRepository::new(state.pool.clone());
    let shares = share_repo
        .find_for_match(ctx.event_id, &conversation_id)
        .await?;

    let shared = shares.iter().any(|s| s.sharer_session_id == ctx.session_id);
    let received = shares
        .into_iter()
        .find(|s| s.recipient_session_id == ctx.session_id)
        .map(Into::into);

    Ok(Json(ContactShareStatus { shared, received }))
}
