//! Message routes: the chat channel for matched pairs.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use domain::models::message::{
    ConversationResponse, MarkReadRequest, MarkReadResponse, Message, SendMessageRequest,
};
use persistence::repositories::{EventRepository, MessageRepository};
use serde::Deserialize;
use shared::ids::match_id;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionContext;
use crate::middleware::metrics::record_message_sent;

/// Send a message to a matched attendee.
///
/// POST /api/v1/messages
///
/// The conversation id is derived from the two session ids, so sender and
/// receiver agree on it without coordination. The row is created unread;
/// optimistic-append rollback on failure is the client's side of the
/// contract.
pub async fn send_message(
    State(state): State<AppState>,
    ctx: SessionContext,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    request.validate()?;

    if request.receiver_session_id == ctx.session_id {
        return Err(ApiError::Validation(
            "You cannot message yourself".to_string(),
        ));
    }

    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let conversation_id = match_id(&ctx.session_id, &request.receiver_session_id);

    let message_repo = MessageRepository::new(state.pool.clone());
    let message = message_repo
        .create_message(
            ctx.event_id,
            &conversation_id,
            &ctx.session_id,
            &request.receiver_session_id,
            request.content.trim(),
        )
        .await?;

    record_message_sent();
    info!(
        event_id = %ctx.event_id,
        match_id = %conversation_id,
        sender = %ctx.session_id,
        "Message sent"
    );

    Ok((StatusCode::CREATED, Json(message.into())))
}

/// Query parameters for loading a conversation.
#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    /// The other party's session id.
    pub with: String,
}

/// Load a conversation, oldest first.
///
/// GET /api/v1/messages?with={session_id}
pub async fn load_conversation(
    State(state): State<AppState>,
    ctx: SessionContext,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<ConversationResponse>, ApiError> {
    if query.with.is_empty() {
        return Err(ApiError::Validation("with is required".to_string()));
    }

    let event_repo = EventRepository::new(state.pool.clone());
    super::require_active_event(&event_repo, ctx.event_id).await?;

    let conversation_id = match_id(&ctx.session_id, &query.with);

    let message_repo = MessageRepository::new(state.pool.clone());
    let messages = message_repo
        .list_conversation(ctx.event_id, &conversation_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ConversationResponse {
        match_id: conversation_id,
        messages,
    }))
}

/// Mark a conversation read.
///
/// POST /api/v1/messages/read
///
/// Called on entering the chat view. Flips every unread message addressed to
/// the caller for this match; a repeat call affects zero rows.
pub async fn mark_conversation_read(
    State(state): State<AppState>,
    ctx: SessionContext,
    Json(request): Json<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    request.validate()?;

    let conversation_id = match_id(&ctx.session_id, &request.with);

    let message_repo = MessageRepository::new(state.pool.clone());
    let marked_read = message_repo
        .mark_conversation_read(ctx.event_id, &conversation_id, &ctx.session_id)
        .await?;

    if marked_read > 0 {
        info!(
            event_id = %ctx.event_id,
            match_id = %conversation_id,
            marked_read = marked_read,
            "Conversation marked read"
        );
    }

    Ok(Json(MarkReadResponse { marked_read }))
}
